//! Tests for page assembly and project ordering.

use std::sync::Arc;

use chrono::Duration;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::content::{Footer, HeroDraft, Sections};
use crate::domain::ports::{ContentRepositoryError, MockPageContentRepository, PageContentSnapshot};
use crate::domain::test_support::fixture_timestamp;

fn project(index: Option<i32>, age_days: i64, id: u128) -> Project {
    Project {
        id: Uuid::from_u128(id),
        title: Some(format!("p{id}")),
        description: None,
        image: None,
        demo_url: None,
        source_url: Some(crate::domain::content::DEFAULT_SOURCE_URL.to_owned()),
        ordering_index: index,
        is_active: true,
        created: fixture_timestamp() - Duration::days(age_days),
        skills: Vec::new(),
    }
}

#[fixture]
fn projects() -> Vec<Project> {
    vec![
        project(None, 0, 1),
        project(Some(2), 5, 2),
        project(Some(1), 9, 3),
        project(Some(2), 1, 4),
        project(None, 3, 5),
        project(Some(2), 1, 6),
    ]
}

fn ids(projects: &[Project]) -> Vec<u128> {
    projects.iter().map(|p| p.id.as_u128()).collect()
}

fn permutations(items: Vec<Project>) -> Vec<Vec<Project>> {
    if items.len() <= 1 {
        return vec![items];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.clone();
        let head = rest.remove(i);
        for mut tail in permutations(rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}

#[rstest]
fn ordering_is_independent_of_input_order(projects: Vec<Project>) {
    // index 1, then index 2 newest first with id tiebreak, then unset indexes newest first
    let expected = vec![3, 4, 6, 2, 1, 5];
    for mut permutation in permutations(projects) {
        order_projects(&mut permutation);
        assert_eq!(ids(&permutation), expected);
    }
}

fn hero() -> Hero {
    Hero::from_draft(
        Uuid::new_v4(),
        HeroDraft {
            full_name: Some("Ana".into()),
            ..HeroDraft::default()
        },
        fixture_timestamp(),
    )
    .expect("valid hero")
}

#[rstest]
#[tokio::test]
async fn failed_fields_degrade_independently(projects: Vec<Project>) {
    let hero = hero();
    let expected_hero = hero.clone();
    let mut repo = MockPageContentRepository::new();
    repo.expect_page_snapshot().times(1).return_once(move || {
        Ok(PageContentSnapshot {
            hero: Ok(Some(hero)),
            about: Err(ContentRepositoryError::query("relation about does not exist")),
            skill_groups: Err(ContentRepositoryError::query("timeout")),
            projects: Ok(projects),
            footer: Ok(Some(Footer {
                id: Uuid::nil(),
                copyright_text: Some("© Ana".into()),
            })),
            ..PageContentSnapshot::empty()
        })
    });
    let service = PageContextService::new(Arc::new(repo));

    let page = service.build().await;

    assert_eq!(page.hero, Some(expected_hero));
    assert!(page.about.is_none());
    assert!(page.skill_groups.is_empty());
    assert_eq!(ids(&page.projects), vec![3, 4, 6, 2, 1, 5]);
    assert_eq!(page.footer.and_then(|f| f.copyright_text).as_deref(), Some("© Ana"));
}

#[rstest]
#[tokio::test]
async fn unavailable_store_yields_an_empty_page() {
    let mut repo = MockPageContentRepository::new();
    repo.expect_page_snapshot()
        .times(1)
        .return_once(|| Err(ContentRepositoryError::connection("refused")));
    let service = PageContextService::new(Arc::new(repo));

    assert_eq!(service.build().await, PageContext::default());
}

#[rstest]
#[tokio::test]
async fn absent_content_is_not_an_error() {
    let mut repo = MockPageContentRepository::new();
    repo.expect_page_snapshot()
        .times(2)
        .returning(|| {
            Ok(PageContentSnapshot {
                sections: Ok(Some(Sections::visible(Uuid::nil()))),
                ..PageContentSnapshot::empty()
            })
        });
    let service = PageContextService::new(Arc::new(repo));

    let first = service.build().await;
    let second = service.build().await;
    assert_eq!(first, second);
    assert!(first.hero.is_none());
    assert!(first.sections.is_some_and(|s| s.process));
}

//! Mutex-guarded in-memory content store.
//!
//! Implements every driven port with the same invariants as the PostgreSQL
//! adapter. Selected when no database URL is configured, and used by tests.

use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::content::{
    CatalogueKind, CatalogueRecord, Contact, ContactWithItems, Footer, InfoItem, Project,
    ProjectRecord, Sections, SingletonKind, SingletonRecord, Skill, SkillGroup,
    SkillGroupWithSkills, SocialLink,
};
use crate::domain::ports::{
    CatalogueRepository, CatalogueRepositoryError, ContentRepositoryError, MessageRepository,
    MessageRepositoryError, PageContentRepository, PageContentSnapshot, SingletonRepository,
    SingletonRepositoryError, UserPersistenceError, UserRepository, WriteMode,
};
use crate::domain::{Message, User, order_projects};

#[derive(Default)]
struct Tables {
    singletons: Vec<SingletonRecord>,
    skill_groups: Vec<SkillGroup>,
    skills: Vec<Skill>,
    projects: Vec<Project>,
    project_skills: Vec<(Uuid, Uuid)>,
    contacts: Vec<Contact>,
    info_items: Vec<InfoItem>,
    social_links: Vec<SocialLink>,
    sections: Vec<Sections>,
    footers: Vec<Footer>,
    messages: Vec<Message>,
    users: Vec<User>,
}

/// Text ordering with `NULL`s last, matching PostgreSQL's ascending default.
fn nulls_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn singleton_order(a: &SingletonRecord, b: &SingletonRecord) -> Ordering {
    match (a, b) {
        (SingletonRecord::MetaData(x), SingletonRecord::MetaData(y)) => {
            nulls_last(x.title.as_deref(), y.title.as_deref())
        }
        (SingletonRecord::Hero(x), SingletonRecord::Hero(y)) => {
            nulls_last(x.full_name.as_deref(), y.full_name.as_deref())
        }
        (SingletonRecord::About(x), SingletonRecord::About(y)) => y.updated_at.cmp(&x.updated_at),
        _ => Ordering::Equal,
    }
}

fn by_title<T>(rows: &mut [T], title: impl Fn(&T) -> Option<&str>, id: impl Fn(&T) -> Uuid) {
    rows.sort_by(|a, b| nulls_last(title(a), title(b)).then_with(|| id(a).cmp(&id(b))));
}

/// Insert or replace `row` in `rows`, keyed by `id`.
fn upsert<T>(
    rows: &mut Vec<T>,
    row: T,
    mode: WriteMode,
    id: impl Fn(&T) -> Uuid,
) -> Result<(), CatalogueRepositoryError> {
    let key = id(&row);
    let position = rows.iter().position(|r| id(r) == key);
    match (mode, position) {
        (WriteMode::Update, None) => Err(CatalogueRepositoryError::not_found(key)),
        (WriteMode::Insert, Some(_)) => Err(CatalogueRepositoryError::query(format!(
            "duplicate catalogue id {key}"
        ))),
        (_, Some(index)) => {
            rows[index] = row;
            Ok(())
        }
        (_, None) => {
            rows.push(row);
            Ok(())
        }
    }
}

/// Remove the row keyed `key`, reporting whether one existed.
fn remove<T>(rows: &mut Vec<T>, key: Uuid, id: impl Fn(&T) -> Uuid) -> bool {
    let before = rows.len();
    rows.retain(|r| id(r) != key);
    rows.len() != before
}

#[derive(Default)]
pub struct InMemoryContentStore {
    tables: Mutex<Tables>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }

    fn seed<F>(&self, apply: F)
    where
        F: FnOnce(&mut Tables),
    {
        match self.tables.lock() {
            Ok(mut tables) => apply(&mut tables),
            Err(poisoned) => apply(&mut poisoned.into_inner()),
        }
    }

    pub fn insert_skill_group(&self, group: SkillGroup) {
        self.seed(|t| t.skill_groups.push(group));
    }

    pub fn insert_skill(&self, skill: Skill) {
        self.seed(|t| t.skills.push(skill));
    }

    /// Insert a project linked to `skill_ids`; `project.skills` is ignored.
    pub fn insert_project(&self, project: Project, skill_ids: &[Uuid]) {
        self.seed(|t| {
            t.project_skills
                .extend(skill_ids.iter().map(|skill| (project.id, *skill)));
            t.projects.push(Project {
                skills: Vec::new(),
                ..project
            });
        });
    }

    pub fn insert_contact(&self, contact: Contact) {
        self.seed(|t| t.contacts.push(contact));
    }

    pub fn insert_info_item(&self, item: InfoItem) {
        self.seed(|t| t.info_items.push(item));
    }

    pub fn insert_social_link(&self, link: SocialLink) {
        self.seed(|t| t.social_links.push(link));
    }

    pub fn insert_sections(&self, sections: Sections) {
        self.seed(|t| t.sections.push(sections));
    }

    pub fn insert_footer(&self, footer: Footer) {
        self.seed(|t| t.footers.push(footer));
    }
}

impl Tables {
    fn active_skills(&self, mut filter: impl FnMut(&Skill) -> bool) -> Vec<Skill> {
        let mut skills: Vec<Skill> = self
            .skills
            .iter()
            .filter(|s| s.is_active && filter(s))
            .cloned()
            .collect();
        skills.sort_by(|a, b| nulls_last(a.title.as_deref(), b.title.as_deref()));
        skills
    }

    fn check_references(&self, record: &CatalogueRecord) -> Result<(), CatalogueRepositoryError> {
        let missing = |field: &str| Err(CatalogueRepositoryError::missing_reference(field));
        let contact_known = |contact: Option<Uuid>| {
            contact.is_none_or(|wanted| self.contacts.iter().any(|c| c.id == wanted))
        };
        match record {
            CatalogueRecord::Skill(skill) => {
                if let Some(group) = skill.group_id
                    && !self.skill_groups.iter().any(|g| g.id == group)
                {
                    return missing("groupId");
                }
            }
            CatalogueRecord::Project(project) => {
                if !project
                    .skill_ids
                    .iter()
                    .all(|skill| self.skills.iter().any(|s| s.id == *skill))
                {
                    return missing("skillIds");
                }
            }
            CatalogueRecord::InfoItem(item) if !contact_known(item.contact_id) => {
                return missing("contactId");
            }
            CatalogueRecord::SocialLink(link) if !contact_known(link.contact_id) => {
                return missing("contactId");
            }
            _ => {}
        }
        Ok(())
    }

    fn write_project(
        &mut self,
        record: &ProjectRecord,
        mode: WriteMode,
    ) -> Result<CatalogueRecord, CatalogueRepositoryError> {
        let (mut project, skill_ids) = record.clone().into_parts();
        if mode == WriteMode::Update
            && let Some(stored) = self.projects.iter().find(|p| p.id == project.id)
        {
            project.created = stored.created;
        }
        upsert(&mut self.projects, project.clone(), mode, |p| p.id)?;
        self.project_skills.retain(|(p, _)| *p != project.id);
        self.project_skills
            .extend(skill_ids.iter().map(|skill| (project.id, *skill)));
        Ok(CatalogueRecord::Project(ProjectRecord::from_parts(
            project, skill_ids,
        )))
    }

    fn write_catalogue(
        &mut self,
        record: &CatalogueRecord,
        mode: WriteMode,
    ) -> Result<CatalogueRecord, CatalogueRepositoryError> {
        self.check_references(record)?;
        match record {
            CatalogueRecord::SkillGroup(row) => {
                upsert(&mut self.skill_groups, row.clone(), mode, |r| r.id)?;
            }
            CatalogueRecord::Skill(row) => upsert(&mut self.skills, row.clone(), mode, |r| r.id)?,
            CatalogueRecord::Project(row) => return self.write_project(row, mode),
            CatalogueRecord::Contact(row) => {
                upsert(&mut self.contacts, row.clone(), mode, |r| r.id)?;
            }
            CatalogueRecord::InfoItem(row) => {
                upsert(&mut self.info_items, row.clone(), mode, |r| r.id)?;
            }
            CatalogueRecord::SocialLink(row) => {
                upsert(&mut self.social_links, row.clone(), mode, |r| r.id)?;
            }
            CatalogueRecord::Sections(row) => upsert(&mut self.sections, *row, mode, |r| r.id)?,
            CatalogueRecord::Footer(row) => upsert(&mut self.footers, row.clone(), mode, |r| r.id)?,
        }
        Ok(record.clone())
    }

    fn catalogue_rows(&self, kind: CatalogueKind) -> Vec<CatalogueRecord> {
        match kind {
            CatalogueKind::SkillGroup => {
                let mut rows = self.skill_groups.clone();
                by_title(&mut rows, |r| r.title.as_deref(), |r| r.id);
                rows.into_iter().map(CatalogueRecord::SkillGroup).collect()
            }
            CatalogueKind::Skill => {
                let mut rows = self.skills.clone();
                by_title(&mut rows, |r| r.title.as_deref(), |r| r.id);
                rows.into_iter().map(CatalogueRecord::Skill).collect()
            }
            CatalogueKind::Project => {
                let mut rows = self.projects.clone();
                order_projects(&mut rows);
                rows.into_iter()
                    .map(|project| {
                        let mut skill_ids: Vec<Uuid> = self
                            .project_skills
                            .iter()
                            .filter(|(p, _)| *p == project.id)
                            .map(|(_, s)| *s)
                            .collect();
                        skill_ids.sort_unstable();
                        CatalogueRecord::Project(ProjectRecord::from_parts(project, skill_ids))
                    })
                    .collect()
            }
            CatalogueKind::Contact => {
                let mut rows = self.contacts.clone();
                by_title(&mut rows, |r| r.title.as_deref(), |r| r.id);
                rows.into_iter().map(CatalogueRecord::Contact).collect()
            }
            CatalogueKind::InfoItem => {
                let mut rows = self.info_items.clone();
                by_title(&mut rows, |r| r.key.as_deref(), |r| r.id);
                rows.into_iter().map(CatalogueRecord::InfoItem).collect()
            }
            CatalogueKind::SocialLink => {
                let mut rows = self.social_links.clone();
                by_title(&mut rows, |r| r.title.as_deref(), |r| r.id);
                rows.into_iter().map(CatalogueRecord::SocialLink).collect()
            }
            CatalogueKind::Sections => {
                let mut rows = self.sections.clone();
                rows.sort_by_key(|r| r.id);
                rows.into_iter().map(CatalogueRecord::Sections).collect()
            }
            CatalogueKind::Footer => {
                let mut rows = self.footers.clone();
                rows.sort_by_key(|r| r.id);
                rows.into_iter().map(CatalogueRecord::Footer).collect()
            }
        }
    }

    /// Delete one row with the same reference rules as the SQL schema.
    fn delete_catalogue(&mut self, kind: CatalogueKind, id: Uuid) -> bool {
        match kind {
            CatalogueKind::SkillGroup => {
                let removed = remove(&mut self.skill_groups, id, |r| r.id);
                for skill in self.skills.iter_mut().filter(|s| s.group_id == Some(id)) {
                    skill.group_id = None;
                }
                removed
            }
            CatalogueKind::Skill => {
                self.project_skills.retain(|(_, skill)| *skill != id);
                remove(&mut self.skills, id, |r| r.id)
            }
            CatalogueKind::Project => {
                self.project_skills.retain(|(project, _)| *project != id);
                remove(&mut self.projects, id, |r| r.id)
            }
            CatalogueKind::Contact => {
                let removed = remove(&mut self.contacts, id, |r| r.id);
                for item in self.info_items.iter_mut().filter(|i| i.contact_id == Some(id)) {
                    item.contact_id = None;
                }
                for link in self.social_links.iter_mut().filter(|l| l.contact_id == Some(id)) {
                    link.contact_id = None;
                }
                removed
            }
            CatalogueKind::InfoItem => remove(&mut self.info_items, id, |r| r.id),
            CatalogueKind::SocialLink => remove(&mut self.social_links, id, |r| r.id),
            CatalogueKind::Sections => remove(&mut self.sections, id, |r| r.id),
            CatalogueKind::Footer => remove(&mut self.footers, id, |r| r.id),
        }
    }

    fn snapshot(&self) -> PageContentSnapshot {
        let active = |kind: SingletonKind| {
            self.singletons
                .iter()
                .find(|r| r.kind() == kind && r.is_active())
                .cloned()
        };
        let metadata = match active(SingletonKind::MetaData) {
            Some(SingletonRecord::MetaData(row)) => Some(row),
            _ => None,
        };
        let hero = match active(SingletonKind::Hero) {
            Some(SingletonRecord::Hero(row)) => Some(row),
            _ => None,
        };
        let about = match active(SingletonKind::About) {
            Some(SingletonRecord::About(row)) => Some(row),
            _ => None,
        };

        let mut groups: Vec<SkillGroup> = self
            .skill_groups
            .iter()
            .filter(|g| g.is_active)
            .cloned()
            .collect();
        groups.sort_by(|a, b| nulls_last(a.title.as_deref(), b.title.as_deref()));
        let skill_groups = groups
            .into_iter()
            .map(|group| SkillGroupWithSkills {
                skills: self.active_skills(|s| s.group_id == Some(group.id)),
                group,
            })
            .collect();

        let projects = self
            .projects
            .iter()
            .filter(|p| p.is_active)
            .map(|project| {
                let linked: Vec<Uuid> = self
                    .project_skills
                    .iter()
                    .filter(|(p, _)| *p == project.id)
                    .map(|(_, s)| *s)
                    .collect();
                Project {
                    skills: self.active_skills(|s| linked.contains(&s.id)),
                    ..project.clone()
                }
            })
            .collect();

        let mut contacts: Vec<&Contact> = self.contacts.iter().filter(|c| c.is_active).collect();
        contacts.sort_by(|a, b| nulls_last(a.title.as_deref(), b.title.as_deref()));
        let contact = contacts.first().map(|contact| {
            let mut info_items: Vec<InfoItem> = self
                .info_items
                .iter()
                .filter(|i| i.is_active && i.contact_id == Some(contact.id))
                .cloned()
                .collect();
            info_items.sort_by(|a, b| nulls_last(a.key.as_deref(), b.key.as_deref()));
            let mut social_links: Vec<SocialLink> = self
                .social_links
                .iter()
                .filter(|l| l.is_active && l.contact_id == Some(contact.id))
                .cloned()
                .collect();
            social_links.sort_by(|a, b| nulls_last(a.title.as_deref(), b.title.as_deref()));
            ContactWithItems {
                contact: (*contact).clone(),
                info_items,
                social_links,
            }
        });

        PageContentSnapshot {
            metadata: Ok(metadata),
            hero: Ok(hero),
            about: Ok(about),
            skill_groups: Ok(skill_groups),
            projects: Ok(projects),
            contact: Ok(contact),
            sections: Ok(self.sections.first().copied()),
            footer: Ok(self.footers.first().cloned()),
        }
    }
}

#[async_trait]
impl SingletonRepository for InMemoryContentStore {
    async fn save_exclusive(
        &self,
        record: &SingletonRecord,
        mode: WriteMode,
    ) -> Result<(), SingletonRepositoryError> {
        let mut tables = self.lock().map_err(SingletonRepositoryError::query)?;
        // Ids are unique across kinds; an update only matches its own kind.
        let taken = tables.singletons.iter().any(|r| r.id() == record.id());
        let position = tables
            .singletons
            .iter()
            .position(|r| r.kind() == record.kind() && r.id() == record.id());
        match (mode, position) {
            (WriteMode::Update, None) => {
                return Err(SingletonRepositoryError::not_found(record.id()));
            }
            (WriteMode::Insert, _) if taken => {
                return Err(SingletonRepositoryError::query(format!(
                    "duplicate singleton id {}",
                    record.id()
                )));
            }
            _ => {}
        }
        if record.is_active() {
            let kind = record.kind();
            for row in tables.singletons.iter_mut() {
                if row.kind() == kind && row.id() != record.id() && row.is_active() {
                    *row = row.deactivated();
                }
            }
        }
        match position {
            Some(index) => tables.singletons[index] = record.clone(),
            None => tables.singletons.push(record.clone()),
        }
        Ok(())
    }

    async fn list(
        &self,
        kind: SingletonKind,
    ) -> Result<Vec<SingletonRecord>, SingletonRepositoryError> {
        let tables = self.lock().map_err(SingletonRepositoryError::query)?;
        let mut rows: Vec<SingletonRecord> = tables
            .singletons
            .iter()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect();
        rows.sort_by(singleton_order);
        Ok(rows)
    }
}

#[async_trait]
impl CatalogueRepository for InMemoryContentStore {
    async fn save(
        &self,
        record: &CatalogueRecord,
        mode: WriteMode,
    ) -> Result<CatalogueRecord, CatalogueRepositoryError> {
        let mut tables = self.lock().map_err(CatalogueRepositoryError::query)?;
        tables.write_catalogue(record, mode)
    }

    async fn list(
        &self,
        kind: CatalogueKind,
    ) -> Result<Vec<CatalogueRecord>, CatalogueRepositoryError> {
        let tables = self.lock().map_err(CatalogueRepositoryError::query)?;
        Ok(tables.catalogue_rows(kind))
    }

    async fn delete(&self, kind: CatalogueKind, id: Uuid) -> Result<(), CatalogueRepositoryError> {
        let mut tables = self.lock().map_err(CatalogueRepositoryError::query)?;
        if tables.delete_catalogue(kind, id) {
            Ok(())
        } else {
            Err(CatalogueRepositoryError::not_found(id))
        }
    }
}

#[async_trait]
impl PageContentRepository for InMemoryContentStore {
    async fn page_snapshot(&self) -> Result<PageContentSnapshot, ContentRepositoryError> {
        let tables = self.lock().map_err(ContentRepositoryError::query)?;
        Ok(tables.snapshot())
    }
}

#[async_trait]
impl MessageRepository for InMemoryContentStore {
    async fn append(&self, message: &Message) -> Result<(), MessageRepositoryError> {
        let mut tables = self.lock().map_err(MessageRepositoryError::query)?;
        tables.messages.push(message.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Message>, MessageRepositoryError> {
        let tables = self.lock().map_err(MessageRepositoryError::query)?;
        let mut messages = tables.messages.clone();
        messages.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(messages)
    }
}

#[async_trait]
impl UserRepository for InMemoryContentStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(UserPersistenceError::duplicate("email"));
        }
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(UserPersistenceError::duplicate("username"));
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        let mut users = tables.users.clone();
        users.sort_by(|a, b| a.email.as_ref().cmp(b.email.as_ref()));
        Ok(users)
    }
}

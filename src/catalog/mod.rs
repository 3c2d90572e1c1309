//! Static telehealth catalog: symptoms, contacts and message threads.
//!
//! The built-in catalog is compiled into the binary. A replacement can be
//! supplied with the `catalog_path` config key; it must use the same layout.

pub mod model;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use model::{
    AttachmentKind, BodyArea, Catalog, Contact, ContactStatus, Message, Role, Symptom,
    UserProfile,
};

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.toml");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("duplicate {kind} id '{id}' in catalog")]
    DuplicateId { kind: &'static str, id: String },
    #[error("thread '{0}' does not belong to any contact")]
    UnknownThread(String),
}

impl Catalog {
    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(contents)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Ids must be unique within body areas, symptoms (across all areas),
    /// contacts (across both roles) and messages (across all threads).
    /// Every thread must belong to a known contact.
    fn validate(&self) -> Result<(), CatalogError> {
        ensure_unique("body area", self.body_areas.iter().map(|a| a.id.as_str()))?;
        ensure_unique(
            "symptom",
            self.body_areas
                .iter()
                .flat_map(|a| a.symptoms.iter().map(|s| s.id.as_str())),
        )?;
        ensure_unique(
            "contact",
            self.contacts
                .patient
                .iter()
                .chain(self.contacts.doctor.iter())
                .map(|c| c.id.as_str()),
        )?;

        let mut thread_ids: Vec<&str> = self.threads.keys().map(String::as_str).collect();
        thread_ids.sort_unstable();
        if let Some(orphan) = thread_ids.iter().find(|id| !self.has_contact(id)) {
            return Err(CatalogError::UnknownThread(orphan.to_string()));
        }
        ensure_unique(
            "message",
            thread_ids
                .iter()
                .flat_map(|id| self.threads[*id].iter().map(|m| m.id.as_str())),
        )?;
        Ok(())
    }

    fn has_contact(&self, id: &str) -> bool {
        self.contacts
            .patient
            .iter()
            .chain(self.contacts.doctor.iter())
            .any(|c| c.id == id)
    }

    pub fn contacts_for(&self, role: Role) -> &[Contact] {
        match role {
            Role::Patient => &self.contacts.patient,
            Role::Doctor => &self.contacts.doctor,
        }
    }

    pub fn profile_for(&self, role: Role) -> &UserProfile {
        match role {
            Role::Patient => &self.users.patient,
            Role::Doctor => &self.users.doctor,
        }
    }

    /// All symptoms in display order, paired with the area they belong to.
    pub fn symptoms_in_order(&self) -> Vec<(&BodyArea, &Symptom)> {
        self.body_areas
            .iter()
            .flat_map(|a| a.symptoms.iter().map(move |s| (a, s)))
            .collect()
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.body_areas.len(), 4);
        assert_eq!(catalog.contacts_for(Role::Patient).len(), 4);
        assert_eq!(catalog.contacts_for(Role::Doctor).len(), 3);
        assert_eq!(catalog.symptoms_in_order().len(), 14);
    }

    #[test]
    fn test_builtin_thread_attachments() {
        let catalog = Catalog::builtin().unwrap();
        let doc3 = &catalog.threads["doc3"];
        assert_eq!(
            doc3[2].attachment.as_ref().map(|a| a.kind),
            Some(AttachmentKind::Prescription)
        );
        assert!(doc3[1].attachment.is_none());
    }

    #[test]
    fn test_symptoms_in_order_follows_areas() {
        let catalog = Catalog::builtin().unwrap();
        let ordered = catalog.symptoms_in_order();
        assert_eq!(ordered[0].0.id, "head");
        assert_eq!(ordered[0].1.id, "headache");
        assert_eq!(ordered.last().map(|(_, s)| s.id.as_str()), Some("chills"));
    }

    #[test]
    fn test_duplicate_symptom_rejected() {
        let doc = r#"
            [users.patient]
            id = "p"
            name = "P"
            [users.doctor]
            id = "d"
            name = "D"

            [[body_areas]]
            id = "a"
            name = "A"
            symptoms = [{ id = "x", name = "X" }]

            [[body_areas]]
            id = "b"
            name = "B"
            symptoms = [{ id = "x", name = "X again" }]
        "#;
        match Catalog::from_toml(doc) {
            Err(CatalogError::DuplicateId { kind, id }) => {
                assert_eq!(kind, "symptom");
                assert_eq!(id, "x");
            }
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    const USERS: &str = r#"
        [users.patient]
        id = "p"
        name = "P"
        [users.doctor]
        id = "d"
        name = "D"
    "#;

    fn contact_toml(role: &str, id: &str) -> String {
        format!(
            r#"
            [[contacts.{role}]]
            id = "{id}"
            name = "Contact {id}"
            specialty = "General"
            avatar_ref = "{id}.png"
            status = "online"
            last_seen = "2024-03-01T09:00:00Z"
            unread_count = 0
            "#
        )
    }

    fn message_toml(thread: &str, id: &str) -> String {
        format!(
            r#"
            [[threads.{thread}]]
            id = "{id}"
            sender_id = "p"
            text = "hello"
            timestamp = "2024-03-01T09:00:00Z"
            read = true
            "#
        )
    }

    #[test]
    fn test_contact_shared_between_roles_rejected() {
        let doc = format!(
            "{}{}{}",
            USERS,
            contact_toml("patient", "x"),
            contact_toml("doctor", "x")
        );
        match Catalog::from_toml(&doc) {
            Err(CatalogError::DuplicateId { kind, id }) => {
                assert_eq!(kind, "contact");
                assert_eq!(id, "x");
            }
            other => panic!("expected duplicate contact error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_message_rejected() {
        let doc = format!(
            "{}{}{}{}",
            USERS,
            contact_toml("patient", "x"),
            message_toml("x", "m1"),
            message_toml("x", "m1")
        );
        match Catalog::from_toml(&doc) {
            Err(CatalogError::DuplicateId { kind, id }) => {
                assert_eq!(kind, "message");
                assert_eq!(id, "m1");
            }
            other => panic!("expected duplicate message error, got {:?}", other),
        }
    }

    #[test]
    fn test_thread_without_contact_rejected() {
        let doc = format!(
            "{}{}{}",
            USERS,
            contact_toml("patient", "x"),
            message_toml("ghost", "m1")
        );
        match Catalog::from_toml(&doc) {
            Err(CatalogError::UnknownThread(id)) => assert_eq!(id, "ghost"),
            other => panic!("expected unknown thread error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_catalog_is_parse_error() {
        assert!(matches!(
            Catalog::from_toml("users = 3"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BUILTIN_CATALOG.as_bytes()).unwrap();
        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog, Catalog::builtin().unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Doctor".parse::<Role>(), Ok(Role::Doctor));
        assert_eq!("patient".parse::<Role>(), Ok(Role::Patient));
        assert!("nurse".parse::<Role>().is_err());
    }
}

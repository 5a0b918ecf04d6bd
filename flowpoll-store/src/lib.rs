//! Flat-file JSON persistence.
//!
//! Each collection lives in one pretty-printed JSON array file under the
//! store's data directory: `surveys.json`, `responses.json`, `users.json`,
//! plus a single-record `admin.json`. A missing file reads as an empty
//! collection. Mutations are read-modify-write of the whole file; the last
//! writer wins, which is acceptable for the single-process deployments this
//! store targets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use flowpoll_types::{Error, Response, Survey, SurveyId, User, UserId};

const SURVEYS_FILE: &str = "surveys.json";
const RESPONSES_FILE: &str = "responses.json";
const USERS_FILE: &str = "users.json";
const ADMIN_FILE: &str = "admin.json";

/// Stored admin credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    pub username: String,
    pub secret: String,
}

/// Handle to a data directory holding the JSON collection files.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.dir
    }

    pub fn surveys(&self) -> Result<Vec<Survey>, Error> {
        self.read_collection(SURVEYS_FILE)
    }

    pub fn survey(&self, id: &SurveyId) -> Result<Option<Survey>, Error> {
        Ok(self.surveys()?.into_iter().find(|survey| &survey.id == id))
    }

    /// Insert or replace a survey by id.
    pub fn put_survey(&self, survey: &Survey) -> Result<(), Error> {
        let mut surveys = self.surveys()?;
        match surveys.iter_mut().find(|existing| existing.id == survey.id) {
            Some(slot) => *slot = survey.clone(),
            None => surveys.push(survey.clone()),
        }
        self.write_collection(SURVEYS_FILE, &surveys)?;
        log::info!("stored survey {} ({})", survey.id, survey.title);
        Ok(())
    }

    /// Remove a survey by id. Returns whether anything was removed.
    pub fn remove_survey(&self, id: &SurveyId) -> Result<bool, Error> {
        let mut surveys = self.surveys()?;
        let before = surveys.len();
        surveys.retain(|survey| &survey.id != id);
        if surveys.len() == before {
            return Ok(false);
        }
        self.write_collection(SURVEYS_FILE, &surveys)?;
        log::info!("removed survey {id}");
        Ok(true)
    }

    pub fn responses(&self) -> Result<Vec<Response>, Error> {
        self.read_collection(RESPONSES_FILE)
    }

    pub fn responses_for(&self, survey_id: &SurveyId) -> Result<Vec<Response>, Error> {
        Ok(self
            .responses()?
            .into_iter()
            .filter(|response| &response.survey_id == survey_id)
            .collect())
    }

    pub fn push_response(&self, response: &Response) -> Result<(), Error> {
        let mut responses = self.responses()?;
        responses.push(response.clone());
        self.write_collection(RESPONSES_FILE, &responses)?;
        log::info!(
            "stored response {} for survey {}",
            response.id,
            response.survey_id
        );
        Ok(())
    }

    pub fn users(&self) -> Result<Vec<User>, Error> {
        self.read_collection(USERS_FILE)
    }

    pub fn user(&self, id: &UserId) -> Result<Option<User>, Error> {
        Ok(self.users()?.into_iter().find(|user| &user.id == id))
    }

    pub fn push_user(&self, user: &User) -> Result<(), Error> {
        let mut users = self.users()?;
        users.push(user.clone());
        self.write_collection(USERS_FILE, &users)?;
        log::info!("stored user {} for survey {}", user.id, user.survey_id);
        Ok(())
    }

    /// Stored admin credentials, or `None` when no admin has been set up.
    pub fn admin(&self) -> Result<Option<AdminRecord>, Error> {
        let path = self.path(ADMIN_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let record = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Some(record))
    }

    pub fn put_admin(&self, record: &AdminRecord) -> Result<(), Error> {
        let path = self.path(ADMIN_FILE);
        let raw = serde_json::to_string_pretty(record)
            .context("failed to serialize admin record")?;
        fs::write(&path, raw)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("stored admin credentials for {}", record.username);
        Ok(())
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, Error> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let items = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(items)
    }

    fn write_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<(), Error> {
        let path = self.path(file);
        let raw = serde_json::to_string_pretty(items)
            .with_context(|| format!("failed to serialize {}", path.display()))?;
        fs::write(&path, raw)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpoll_types::{Choice, Question};
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        (dir, store)
    }

    fn sample_survey() -> Survey {
        Survey::new(
            "Sample",
            "fixture",
            vec![Question::new("Q1", vec![Choice::new("a")])],
        )
    }

    #[test]
    fn missing_files_read_as_empty_collections() {
        let (_dir, store) = store();
        assert!(store.surveys().unwrap().is_empty());
        assert!(store.responses().unwrap().is_empty());
        assert!(store.users().unwrap().is_empty());
        assert!(store.admin().unwrap().is_none());
    }

    #[test]
    fn put_survey_inserts_then_replaces() {
        let (_dir, store) = store();
        let mut survey = sample_survey();
        store.put_survey(&survey).unwrap();

        survey.title = "Renamed".into();
        store.put_survey(&survey).unwrap();

        let surveys = store.surveys().unwrap();
        assert_eq!(surveys.len(), 1);
        assert_eq!(surveys[0].title, "Renamed");
    }

    #[test]
    fn remove_survey_reports_whether_it_existed() {
        let (_dir, store) = store();
        let survey = sample_survey();
        store.put_survey(&survey).unwrap();

        assert!(store.remove_survey(&survey.id).unwrap());
        assert!(!store.remove_survey(&survey.id).unwrap());
        assert!(store.surveys().unwrap().is_empty());
    }

    #[test]
    fn responses_for_filters_by_survey() {
        let (_dir, store) = store();
        let a = sample_survey();
        let b = sample_survey();

        let response = Response::new(a.id.clone(), UserId::generate(), "Ada", "Lovelace", vec![]);
        store.push_response(&response).unwrap();
        store
            .push_response(&Response::new(
                b.id.clone(),
                UserId::generate(),
                "Grace",
                "Hopper",
                vec![],
            ))
            .unwrap();

        let for_a = store.responses_for(&a.id).unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].id, response.id);
    }

    #[test]
    fn users_round_trip_through_the_file() {
        let (_dir, store) = store();
        let survey = sample_survey();
        let user = User::new("Ayşe", "Yılmaz", "12345678901", "HL-42", survey.id.clone());
        store.push_user(&user).unwrap();

        let found = store.user(&user.id).unwrap().unwrap();
        assert_eq!(found.national_id, "12345678901");
        assert!(store.user(&UserId::generate()).unwrap().is_none());
    }

    #[test]
    fn admin_record_round_trips() {
        let (_dir, store) = store();
        let record = AdminRecord {
            username: "admin".into(),
            secret: "hunter2".into(),
        };
        store.put_admin(&record).unwrap();

        let found = store.admin().unwrap().unwrap();
        assert_eq!(found.username, "admin");
        assert_eq!(found.secret, "hunter2");
    }

    #[test]
    fn corrupt_file_surfaces_a_store_error() {
        let (dir, store) = store();
        fs::write(dir.path().join(SURVEYS_FILE), "not json").unwrap();

        let err = store.surveys().unwrap_err();
        assert!(matches!(err, Error::Store(_)));
    }
}

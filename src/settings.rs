use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub user_email: Option<String>,
    pub user_id: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".into(),
            auth_token: None,
            user_email: None,
            user_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AppSettings {
    api: ApiSettings,
}

/// JSON-file settings: the remote API endpoint and the signed-in user's
/// token, surviving across CLI invocations.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<AppSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            AppSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn api(&self) -> ApiSettings {
        self.data.read().unwrap().api.clone()
    }

    pub fn store_auth(&self, token: String, email: String, uid: String) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.api.auth_token = Some(token);
            guard.api.user_email = Some(email);
            guard.api.user_id = Some(uid);
            self.persist(&guard)?;
        }
        Ok(())
    }

    pub fn clear_auth(&self) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.api.auth_token = None;
            guard.api.user_email = None;
            guard.api.user_id = None;
            self.persist(&guard)?;
        }
        Ok(())
    }

    pub fn set_base_url(&self, base_url: String) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.api.base_url = base_url;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &AppSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory {}", parent.display())
            })?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        let api = store.api();
        assert_eq!(api.base_url, "http://localhost:3001");
        assert!(api.auth_token.is_none());
    }

    #[test]
    fn auth_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .store_auth("tok".into(), "dev@example.com".into(), "u-1".into())
            .unwrap();

        let reloaded = SettingsStore::new(path).unwrap();
        let api = reloaded.api();
        assert_eq!(api.auth_token.as_deref(), Some("tok"));
        assert_eq!(api.user_id.as_deref(), Some("u-1"));
    }

    #[test]
    fn clear_auth_removes_token_but_keeps_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        store.set_base_url("http://tracker.local".into()).unwrap();
        store
            .store_auth("tok".into(), "dev@example.com".into(), "u-1".into())
            .unwrap();

        store.clear_auth().unwrap();
        let api = store.api();
        assert!(api.auth_token.is_none());
        assert_eq!(api.base_url, "http://tracker.local");
    }
}

use super::{Binary, Formats, Result, Validate, ValidationContext};
use crate::validation::{composite, FieldError};

/// How ownership of volumes is changed when mounted
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum FsGroupChangePolicy {
    /// Always change permissions and ownership on mount
    Always,
    /// Only change them when the root of the volume does not match
    OnRootMismatch,
}

/// Security context for ownership of volumes and processes
///
/// Mirrors [kubernetes PodSecurityContext](https://kubernetes.io/docs/tasks/configure-pod-container/security-context/)
/// with ids sent as strings. The three `runAs` fields are required and are
/// always written, as `null` when unset.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecurityContext {
    #[serde(default, deserialize_with = "crate::deserializers::nullable_string", skip_serializing_if = "String::is_empty")]
    pub fs_group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_group_change_policy: Option<FsGroupChangePolicy>,

    // keys are written in alphabetical order like other producers
    #[serde(default)]
    pub run_as_group: Option<String>,
    #[serde(default)]
    pub run_as_non_root: Option<bool>,
    #[serde(default)]
    pub run_as_user: Option<String>,
}

impl SecurityContext {
    /// A context running as the given non-root uid/gid
    pub fn non_root(uid: u32, gid: u32) -> Self {
        SecurityContext {
            run_as_user: Some(uid.to_string()),
            run_as_group: Some(gid.to_string()),
            run_as_non_root: Some(true),
            fs_group: gid.to_string(),
            fs_group_change_policy: None,
        }
    }
}

impl Validate for SecurityContext {
    fn validate_with(&self, ctx: Option<&ValidationContext>, formats: &Formats) -> Result<()> {
        let mut res = vec![];

        for (path, id) in &[("runAsUser", &self.run_as_user), ("runAsGroup", &self.run_as_group)] {
            match id {
                None => res.push(FieldError::required(path)),
                Some(v) => res.extend(formats.check("int64", path, v)),
            }
        }
        if self.run_as_non_root.is_none() {
            res.push(FieldError::required("runAsNonRoot"));
        }
        if !self.fs_group.is_empty() {
            res.extend(formats.check("int64", "fsGroup", &self.fs_group));
        }

        if let Some(c) = ctx {
            if c.is_prod() && self.run_as_non_root == Some(false) {
                warn!("security context allows root in {}", c.environment.to_string());
                res.push(FieldError::new("runAsNonRoot", "must be true in prod"));
            }
        }
        composite(res)
    }
}

impl Binary for SecurityContext {
    const NAME: &'static str = "securityContext";
}

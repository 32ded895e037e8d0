use super::{ErrorKind, Result, ResultExt};

/// Environments are well defined strings
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production environment
    ///
    /// Security contexts must not run as root here.
    Prod,

    // Normal environment names
    Preprod,
    Staging,
    Dev,
    Test,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Dev
    }
}

impl ToString for Environment {
    fn to_string(&self) -> String {
        // NB: this corresponds to serde serialization
        format!("{:?}", self).to_lowercase()
    }
}

/// Ambient context passed through context-aware validation
///
/// Models do not interpret it themselves, they hand it to the sub-models
/// that have environment specific rules.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ValidationContext {
    /// Environment the validated document is destined for
    pub environment: Environment,
}

impl ValidationContext {
    pub fn new(environment: Environment) -> Self {
        ValidationContext { environment }
    }

    /// Read a context from a yaml config document
    ///
    /// Missing keys fall back to defaults.
    pub fn from_yaml(data: &str) -> Result<Self> {
        let ctx: ValidationContext = serde_yaml::from_str(data)
            .chain_err(|| ErrorKind::Decoding("validationContext".into()))?;
        debug!("using validation context for {}", ctx.environment.to_string());
        Ok(ctx)
    }

    pub fn is_prod(&self) -> bool {
        self.environment == Environment::Prod
    }
}

use super::{Binary, Formats, Result, SecurityContext, Validate, ValidationContext};
use crate::deserializers::{finite_number, nullable_string};
use crate::validation::{composite, nested};

/// Prometheus configuration of a tenant
///
/// Every field is optional. Empty strings are never written; `storageSize`
/// and `securityContext` distinguish unset from a zero value.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrometheusConfiguration {
    /// Container image reference
    #[serde(default, deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub image: String,

    /// Security context for the prometheus pods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<SecurityContext>,

    /// Storage class of the volume claim
    #[serde(default, deserialize_with = "nullable_string", skip_serializing_if = "String::is_empty")]
    pub storage_class: String,

    /// Size of the volume claim
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "finite_number")]
    pub storage_size: Option<f64>,
}

impl Validate for PrometheusConfiguration {
    // scalar fields carry no constraints, only the security context is checked
    fn validate_with(&self, ctx: Option<&ValidationContext>, formats: &Formats) -> Result<()> {
        let mut res = vec![];
        nested("securityContext", self.security_context.as_ref(), ctx, formats, &mut res)?;
        composite(res)
    }
}

impl Binary for PrometheusConfiguration {
    const NAME: &'static str = "prometheusConfiguration";
}

//! Session snapshot extraction.
//!
//! The snapshot arrives as one JSON document in which every field, and
//! every parent object, may be absent or null. A document that is not
//! JSON at all is fatal upstream; anything inside a valid document takes
//! its documented default instead of failing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Token budget assumed when the snapshot does not carry one.
pub const DEFAULT_CONTEXT_WINDOW: i64 = 200_000;

/// Stand-in for a missing model display name; the model segment is
/// always rendered.
pub const DEFAULT_MODEL_NAME: &str = "Claude";

/// Deserialize a field into `None` when it is null or of the wrong JSON
/// type, instead of failing the whole document. Buffers through
/// `serde_json::Value`, which is fine for a snapshot this small.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

#[derive(Deserialize, Default)]
pub struct SessionInput {
    #[serde(default, deserialize_with = "lenient")]
    model: Option<Model>,
    #[serde(default, deserialize_with = "lenient")]
    workspace: Option<Workspace>,
    #[serde(default, deserialize_with = "lenient")]
    context_window: Option<ContextWindow>,
    #[serde(default, deserialize_with = "lenient")]
    cost: Option<Cost>,
}

#[derive(Deserialize, Default)]
pub struct Model {
    #[serde(default, deserialize_with = "lenient")]
    display_name: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct Workspace {
    #[serde(default, deserialize_with = "lenient")]
    current_dir: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct ContextWindow {
    #[serde(default, deserialize_with = "lenient")]
    context_window_size: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    current_usage: Option<CurrentUsage>,
}

#[derive(Deserialize, Default)]
pub struct CurrentUsage {
    #[serde(default, deserialize_with = "lenient")]
    input_tokens: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    cache_creation_input_tokens: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    cache_read_input_tokens: Option<i64>,
}

#[derive(Deserialize, Default)]
pub struct Cost {
    #[serde(default, deserialize_with = "lenient")]
    total_cost_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    total_lines_added: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    total_lines_removed: Option<i64>,
}

impl SessionInput {
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn model_name(&self) -> &str {
        self.model
            .as_ref()
            .and_then(|m| m.display_name.as_deref())
            .unwrap_or(DEFAULT_MODEL_NAME)
    }

    pub fn current_dir(&self) -> Option<&str> {
        self.workspace.as_ref().and_then(|w| w.current_dir.as_deref())
    }

    pub fn window_size(&self) -> i64 {
        self.context_window
            .as_ref()
            .and_then(|c| c.context_window_size)
            .unwrap_or(DEFAULT_CONTEXT_WINDOW)
    }

    /// Total tokens consumed so far: the three usage counters summed,
    /// each independently defaulting to 0.
    pub fn current_usage(&self) -> u64 {
        let Some(usage) = self.context_window.as_ref().and_then(|c| c.current_usage.as_ref())
        else {
            return 0;
        };
        let total = usage
            .input_tokens
            .unwrap_or(0)
            .saturating_add(usage.cache_creation_input_tokens.unwrap_or(0))
            .saturating_add(usage.cache_read_input_tokens.unwrap_or(0));
        u64::try_from(total).unwrap_or(0)
    }

    pub fn cost_usd(&self) -> f64 {
        self.cost.as_ref().and_then(|c| c.total_cost_usd).unwrap_or(0.0)
    }

    pub fn lines_added(&self) -> u64 {
        let added = self.cost.as_ref().and_then(|c| c.total_lines_added).unwrap_or(0);
        u64::try_from(added).unwrap_or(0)
    }

    pub fn lines_removed(&self) -> u64 {
        let removed = self.cost.as_ref().and_then(|c| c.total_lines_removed).unwrap_or(0);
        u64::try_from(removed).unwrap_or(0)
    }
}

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Durable key-value settings store with process-wide named slots.
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// `Ok(None)` when the slot was never written.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Write several slots; implementations may do it in one write.
    async fn set_many(&self, values: Vec<(String, Value)>) -> Result<()> {
        for (key, value) in values {
            self.set(&key, value).await?;
        }
        Ok(())
    }
}

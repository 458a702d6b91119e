//! Sample methods served by the demo binary.

use anyhow::anyhow;
use tokio::time::{sleep, Duration};

use crate::core::handler::{async_method, sync_method};
use crate::rpc::registry::Registry;

/// Registry with the demo math methods bound.
pub fn build_registry() -> Registry {
    let mut reg = Registry::new();
    reg.register("add", sync_method(&["x", "y"], |(x, y): (i64, i64)| Ok(x + y)));
    reg.register("factorial", async_method(&["n"], |(n,): (u64,)| factorial(n)));
    reg
}

/// Slow on purpose: simulates a method that suspends on downstream work before
/// producing its result.
async fn factorial(n: u64) -> anyhow::Result<u64> {
    tracing::info!(n, "calculating factorial, this might take a while");
    sleep(Duration::from_secs(5)).await;

    let mut acc: u64 = 1;
    for k in 2..=n {
        acc = acc
            .checked_mul(k)
            .ok_or_else(|| anyhow!("factorial of {n} overflows u64"))?;
    }
    tracing::info!(n, result = acc, "factorial done");
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::dispatcher::Dispatcher;
    use serde_json::{json, Value};

    #[test]
    fn registry_has_the_demo_methods() {
        let reg = build_registry();
        assert!(reg.resolve("add").is_ok());
        assert!(reg.resolve("factorial").is_ok());
    }

    #[tokio::test]
    async fn add_works_end_to_end() {
        let d = Dispatcher::new(build_registry());
        let reply = d
            .dispatch(r#"{"jsonrpc":"2.0","method":"add","params":[2,3],"id":1}"#)
            .await
            .unwrap();
        let v: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(v, json!({"jsonrpc":"2.0","result":5,"id":1}));
    }

    #[tokio::test(start_paused = true)]
    async fn factorial_suspends_then_replies() {
        let d = Dispatcher::new(build_registry());
        let reply = d
            .dispatch(r#"{"jsonrpc":"2.0","method":"factorial","params":{"n":5},"id":2}"#)
            .await
            .unwrap();
        let v: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(v["result"], 120);
    }

    #[tokio::test(start_paused = true)]
    async fn factorial_overflow_is_an_internal_error() {
        let d = Dispatcher::new(build_registry());
        let reply = d
            .dispatch(r#"{"jsonrpc":"2.0","method":"factorial","params":[99],"id":3}"#)
            .await
            .unwrap();
        let v: Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(v["error"]["code"], -32603);
    }
}

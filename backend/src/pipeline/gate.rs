//! Gate trait, gate outcomes, and the pipeline driver.

use async_trait::async_trait;
use axum::response::Response;

use super::GateContext;

/// Result of evaluating a single gate.
pub enum Outcome {
    /// Pass the (possibly augmented) context to the next gate.
    Continue(GateContext),
    /// Stop the pipeline and answer the request with this response instead.
    ShortCircuit(Response),
}

/// A pipeline stage that may pass through, transform, or short-circuit a
/// request.
#[async_trait]
pub trait Gate: Send + Sync {
    async fn evaluate(&self, ctx: GateContext) -> Outcome;
}

/// An ordered chain of gates plus a small driver loop.
///
/// Gates run in the order they were added. The first short-circuit wins and
/// no later gate is evaluated.
#[derive(Default)]
pub struct Pipeline {
    gates: Vec<Box<dyn Gate>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline { gates: Vec::new() }
    }

    /// Appends a gate to the end of the chain.
    pub fn gate(mut self, gate: impl Gate + 'static) -> Self {
        self.gates.push(Box::new(gate));
        self
    }

    /// Runs the chain to completion. `Ok` carries the fully-resolved context,
    /// `Err` the short-circuit response of whichever gate stopped first.
    pub async fn run(&self, mut ctx: GateContext) -> Result<GateContext, Response> {
        for gate in &self.gates {
            match gate.evaluate(ctx).await {
                Outcome::Continue(next) => ctx = next,
                Outcome::ShortCircuit(response) => return Err(response),
            }
        }
        Ok(ctx)
    }

    /// Runs the chain and applies `respond` to the final context on success.
    pub async fn respond<F>(&self, ctx: GateContext, respond: F) -> Response
    where
        F: FnOnce(GateContext) -> Response,
    {
        match self.run(ctx).await {
            Ok(ctx) => respond(ctx),
            Err(response) => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::{Arc, Mutex};

    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Gate for Recording {
        async fn evaluate(&self, ctx: GateContext) -> Outcome {
            self.log.lock().unwrap().push(self.name);
            Outcome::Continue(ctx)
        }
    }

    struct Stop {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl Gate for Stop {
        async fn evaluate(&self, _ctx: GateContext) -> Outcome {
            self.log.lock().unwrap().push("stop");
            Outcome::ShortCircuit(StatusCode::FOUND.into_response())
        }
    }

    #[tokio::test]
    async fn gates_run_in_declared_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .gate(Recording { name: "first", log: log.clone() })
            .gate(Recording { name: "second", log: log.clone() })
            .gate(Recording { name: "third", log: log.clone() });

        let result = pipeline.run(GateContext::new("/")).await;
        assert!(result.is_ok());
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn short_circuit_skips_downstream_gates() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new()
            .gate(Recording { name: "first", log: log.clone() })
            .gate(Stop { log: log.clone() })
            .gate(Recording { name: "never", log: log.clone() });

        let result = pipeline.run(GateContext::new("/")).await;
        let response = result.err().unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(*log.lock().unwrap(), vec!["first", "stop"]);
    }

    #[tokio::test]
    async fn empty_pipeline_yields_the_seed_context() {
        let pipeline = Pipeline::new();
        let ctx = pipeline.run(GateContext::new("/account")).await.unwrap();
        assert_eq!(ctx.request_path(), "/account");
    }

    #[tokio::test]
    async fn respond_applies_responder_only_on_success() {
        let pipeline = Pipeline::new();
        let response = pipeline
            .respond(GateContext::new("/"), |_ctx| {
                StatusCode::OK.into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new().gate(Stop { log });
        let response = pipeline
            .respond(GateContext::new("/"), |_ctx| {
                StatusCode::OK.into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::FOUND);
    }
}

//! Client call wrappers and the orchestration helpers built on them.
//!
//! Each wrapper performs one round-trip and logs either the result or the
//! caught error; nothing is returned to the caller. The `fetch_*` companions
//! expose the typed outcome for code that needs it.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use serde_json::Value;
use tracing::{error, info};

use crate::client::DemoClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{split_chars, AverageReport, DeleteReport, Greeting, ShoutReport};

/// Inputs for one pass over all four routes.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub lang: Option<String>,
    pub numbers: Vec<Value>,
    pub word: String,
    pub role: String,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "yossi".to_string(),
            lang: Some("he".to_string()),
            numbers: split_chars("12345"),
            word: "medina".to_string(),
            role: "admin".to_string(),
        }
    }
}

type Step<T> = fn(&Caller<T>, &Scenario);

pub struct Caller<T> {
    client: DemoClient,
    transport: T,
}

impl<T: Transport> Caller<T> {
    pub fn new(client: DemoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &DemoClient {
        &self.client
    }

    pub fn fetch_greet(&self, name: &str, lang: Option<&str>) -> Result<Greeting, ApiError> {
        let request = self.client.build_greet(name, lang)?;
        self.client.parse_greet(self.transport.execute(request)?)
    }

    pub fn fetch_average(&self, numbers: &[Value]) -> Result<AverageReport, ApiError> {
        let request = self.client.build_average(numbers)?;
        self.client.parse_average(self.transport.execute(request)?)
    }

    pub fn fetch_shout(&self, word: &str) -> Result<ShoutReport, ApiError> {
        let request = self.client.build_shout(word)?;
        self.client.parse_shout(self.transport.execute(request)?)
    }

    pub fn fetch_delete_resource(&self, role: &str) -> Result<DeleteReport, ApiError> {
        let request = self.client.build_delete_resource(role)?;
        self.client
            .parse_delete_resource(self.transport.execute(request)?)
    }

    pub fn greet(&self, name: &str, lang: Option<&str>) {
        match self.fetch_greet(name, lang) {
            Ok(greeting) => info!(result = %greeting.result, "greet"),
            Err(err) => log_failure("greet", &err),
        }
    }

    pub fn average(&self, numbers: &[Value]) {
        match self.fetch_average(numbers) {
            Ok(report) => info!(
                count = report.result.count,
                sum = report.result.sum,
                average = report.result.average,
                "average"
            ),
            Err(err) => log_failure("average", &err),
        }
    }

    pub fn shout(&self, word: &str) {
        match self.fetch_shout(word) {
            Ok(report) => info!(
                uppercased = %report.result.uppercased,
                length = report.result.length,
                is_long = report.result.is_long,
                "shout"
            ),
            Err(err) => log_failure("shout", &err),
        }
    }

    pub fn delete_resource(&self, role: &str) {
        match self.fetch_delete_resource(role) {
            Ok(report) => info!(role = %report.input.role, result = %report.result, "delete"),
            Err(err) => log_failure("delete", &err),
        }
    }

    fn steps() -> [Step<T>; 4] {
        [
            |caller, s| caller.greet(&s.name, s.lang.as_deref()),
            |caller, s| caller.average(&s.numbers),
            |caller, s| caller.shout(&s.word),
            |caller, s| caller.delete_resource(&s.role),
        ]
    }

    /// Run the four calls one after another. Each call starts only once the
    /// previous one has logged; failures are logged and the chain continues.
    pub fn run_sequential(&self, scenario: &Scenario) {
        for step in Self::steps() {
            step(self, scenario);
        }
        info!("finished all calls");
    }

    /// Run the four calls on scoped threads and wait for all of them before
    /// logging completion.
    pub fn run_concurrent_joined(&self, scenario: &Scenario) {
        thread::scope(|scope| {
            for step in Self::steps() {
                scope.spawn(move || step(self, scenario));
            }
        });
        info!("finished all calls");
    }
}

impl<T: Transport + 'static> Caller<T> {
    /// Start the four calls on detached threads and log completion right
    /// away, without waiting. The marker can appear before any result.
    ///
    /// The handles are returned so a process about to exit can still let the
    /// calls finish; dropping them leaves the threads running.
    pub fn run_concurrent(self: &Arc<Self>, scenario: &Scenario) -> Vec<JoinHandle<()>> {
        let scenario = Arc::new(scenario.clone());
        let handles = Self::steps()
            .into_iter()
            .map(|step| {
                let caller = Arc::clone(self);
                let scenario = Arc::clone(&scenario);
                thread::spawn(move || step(&caller, &scenario))
            })
            .collect();
        info!("finished all calls");
        handles
    }
}

/// Wait for detached calls, logging any that panicked. Returns how many did.
pub fn join_detached(handles: Vec<JoinHandle<()>>) -> usize {
    let mut panicked = 0;
    for handle in handles {
        if let Err(payload) = handle.join() {
            let message = payload
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("non-string panic payload");
            error!(panic = message, "call thread panicked");
            panicked += 1;
        }
    }
    panicked
}

fn log_failure(call: &'static str, err: &ApiError) {
    match err {
        ApiError::Rejected { body, .. } => error!(call, error = %err, response = %body, "call failed"),
        _ => error!(call, error = %err, "call failed"),
    }
}

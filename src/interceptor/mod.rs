// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Automatic instrumentation of tool registration.
//!
//! [`Monitor::wrap`](crate::Monitor::wrap) puts a [`MonitoredRegistrar`] in
//! front of a host's [`ToolRegistrar`]. Every registration passing through it
//! is classified into a [`RegistrationShape`]; recognized registrations get
//! their handler replaced by an instrumented one, anything else reaches the
//! host exactly as it was sent.

mod handler;
mod shape;

pub use shape::RegistrationShape;

pub(crate) use handler::Instrumentation;

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::tools::{ToolArg, ToolRegistrar};

/// A host registrar with monitoring installed.
///
/// Dereferences to the wrapped registrar, so the host's own API stays
/// reachable.
pub struct MonitoredRegistrar<R> {
    inner: R,
    /// `None` when the host exposes no registration to intercept.
    instrumentation: Option<Arc<Instrumentation>>,
    monitored: Vec<String>,
}

impl<R: ToolRegistrar> MonitoredRegistrar<R> {
    pub(crate) fn install(inner: R, instrumentation: Arc<Instrumentation>) -> Self {
        if !inner.accepts_tools() {
            warn!("Could not find tool registration on the host; tools will not be monitored");
            return Self {
                inner,
                instrumentation: None,
                monitored: Vec::new(),
            };
        }

        if instrumentation.debug {
            debug!("Wrapped tool registrar; tools registered from now on will be monitored");
        }

        Self {
            inner,
            instrumentation: Some(instrumentation),
            monitored: Vec::new(),
        }
    }
}

impl<R> MonitoredRegistrar<R> {
    /// Whether registrations are being instrumented.
    pub fn is_installed(&self) -> bool {
        self.instrumentation.is_some()
    }

    /// Names of the tools instrumented so far, in registration order.
    pub fn monitored_tools(&self) -> &[String] {
        &self.monitored
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: ToolRegistrar> ToolRegistrar for MonitoredRegistrar<R> {
    type Output = R::Output;

    fn tool(&mut self, name: &str, args: Vec<ToolArg>) -> Self::Output {
        let Some(instrumentation) = self.instrumentation.clone() else {
            return self.inner.tool(name, args);
        };

        match RegistrationShape::classify(args) {
            RegistrationShape::Unrecognized(args) => {
                trace!(tool = %name, args = args.len(), "Unrecognized registration; passing through");
                self.inner.tool(name, args)
            }
            shape => {
                if instrumentation.debug {
                    debug!(tool = %name, shape = shape.kind(), "Monitoring tool");
                }
                self.monitored.push(name.to_string());
                let args = shape
                    .map_handler(|h| handler::instrument(instrumentation, name, h))
                    .into_args();
                self.inner.tool(name, args)
            }
        }
    }

    fn accepts_tools(&self) -> bool {
        self.inner.accepts_tools()
    }
}

impl<R> Deref for MonitoredRegistrar<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.inner
    }
}

impl<R> DerefMut for MonitoredRegistrar<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.inner
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for MonitoredRegistrar<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitoredRegistrar")
            .field("inner", &self.inner)
            .field("installed", &self.is_installed())
            .field("monitored", &self.monitored)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::tests::MemorySink;
    use crate::reporter::Reporter;
    use crate::telemetry::CallMetrics;
    use crate::tools::ToolFn;
    use serde_json::{json, Value};

    /// Host that records what it was asked to register.
    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<(String, Vec<ToolArg>)>,
        accepts: bool,
    }

    impl ToolRegistrar for RecordingHost {
        type Output = usize;

        fn tool(&mut self, name: &str, args: Vec<ToolArg>) -> usize {
            self.calls.push((name.to_string(), args));
            self.calls.len()
        }

        fn accepts_tools(&self) -> bool {
            self.accepts
        }
    }

    fn instrumentation() -> Arc<Instrumentation> {
        let sink = Arc::new(MemorySink::default());
        Arc::new(Instrumentation {
            reporter: Some(Reporter::new(sink, true, false)),
            agent: "test".to_string(),
            debug: true,
            metrics: Arc::new(CallMetrics::new()),
        })
    }

    fn handler() -> ToolFn {
        ToolFn::new(|_, _| async { Ok(Value::Null) })
    }

    #[test]
    fn test_recognized_handler_is_replaced() {
        let host = RecordingHost {
            accepts: true,
            ..Default::default()
        };
        let mut wrapped = MonitoredRegistrar::install(host, instrumentation());
        let original = handler();

        let output = wrapped.tool("add", vec![json!({}).into(), original.clone().into()]);

        assert_eq!(output, 1);
        assert_eq!(wrapped.monitored_tools(), ["add".to_string()]);
        let (_, args) = &wrapped.calls[0];
        assert!(!args[1].as_handler().unwrap().ptr_eq(&original));
    }

    #[test]
    fn test_unrecognized_passes_through() {
        let host = RecordingHost {
            accepts: true,
            ..Default::default()
        };
        let mut wrapped = MonitoredRegistrar::install(host, instrumentation());
        let original = handler();

        wrapped.tool("odd", vec![original.clone().into()]);

        assert!(wrapped.monitored_tools().is_empty());
        let (name, args) = &wrapped.calls[0];
        assert_eq!(name, "odd");
        assert!(args[0].as_handler().unwrap().ptr_eq(&original));
    }

    #[test]
    fn test_host_without_registration() {
        let host = RecordingHost::default();
        let mut wrapped = MonitoredRegistrar::install(host, instrumentation());
        assert!(!wrapped.is_installed());

        let original = handler();
        wrapped.tool("add", vec![json!({}).into(), original.clone().into()]);

        assert!(wrapped.monitored_tools().is_empty());
        let (_, args) = &wrapped.calls[0];
        assert!(args[1].as_handler().unwrap().ptr_eq(&original));
    }

    #[test]
    fn test_into_inner() {
        let host = RecordingHost {
            accepts: true,
            ..Default::default()
        };
        let mut wrapped = MonitoredRegistrar::install(host, instrumentation());
        wrapped.tool("a", vec![json!({}).into(), handler().into()]);

        let host = wrapped.into_inner();
        assert_eq!(host.calls.len(), 1);
    }
}

//! Counters shown as the engine's status variables

use std::sync::atomic::{AtomicU64, Ordering};

use keti::KetiError;

/// One `SHOW STATUS` row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusVar {
    pub name: &'static str,
    pub value: u64,
}

/// Shared by every handler of one handlerton
#[derive(Debug, Default)]
pub(crate) struct StatusCounters {
    rows_written: AtomicU64,
    write_failures: AtomicU64,
    scans_started: AtomicU64,
    scan_errors: AtomicU64,
    connect_failures: AtomicU64,
}

impl StatusCounters {
    pub(crate) fn record_write(&self, res: &keti::Result<()>) {
        match res {
            Ok(()) => bump(&self.rows_written),
            Err(e) => {
                bump(&self.write_failures);
                self.record_connect_failure(e);
            }
        }
    }

    pub(crate) fn record_scan_start(&self, res: &keti::Result<()>) {
        match res {
            Ok(()) => bump(&self.scans_started),
            Err(e) => {
                bump(&self.scan_errors);
                self.record_connect_failure(e);
            }
        }
    }

    pub(crate) fn record_scan_error(&self) {
        bump(&self.scan_errors);
    }

    fn record_connect_failure(&self, e: &KetiError) {
        if e.is_connect() {
            bump(&self.connect_failures);
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<StatusVar> {
        let get = |name, counter: &AtomicU64| StatusVar {
            name,
            value: counter.load(Ordering::Relaxed),
        };
        vec![
            get("keti_rows_written", &self.rows_written),
            get("keti_write_failures", &self.write_failures),
            get("keti_scans_started", &self.scans_started),
            get("keti_scan_errors", &self.scan_errors),
            get("keti_connect_failures", &self.connect_failures),
        ]
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn value(vars: &[StatusVar], name: &str) -> u64 {
        vars.iter().find(|v| v.name == name).unwrap().value
    }

    #[test]
    fn counts_outcomes() {
        let st = StatusCounters::default();
        st.record_write(&Ok(()));
        st.record_write(&Err(KetiError::Protocol {
            reply: "failure".into(),
        }));
        st.record_scan_start(&Err(KetiError::Connect {
            endpoint: keti::Endpoint::default(),
            source: io::ErrorKind::ConnectionRefused.into(),
        }));
        st.record_scan_error();

        let vars = st.snapshot();
        assert_eq!(value(&vars, "keti_rows_written"), 1);
        assert_eq!(value(&vars, "keti_write_failures"), 1);
        assert_eq!(value(&vars, "keti_scans_started"), 0);
        assert_eq!(value(&vars, "keti_scan_errors"), 2);
        assert_eq!(value(&vars, "keti_connect_failures"), 1);
    }
}

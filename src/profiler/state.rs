use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

/// Thread-safe running totals, keyed and reported by name
#[derive(Debug, Default)]
pub(crate) struct ProfilingState {
    totals: Mutex<BTreeMap<String, Duration>>,
}

impl ProfilingState {
    pub fn record(&self, name: &str, elapsed: Duration) {
        let mut totals = self.totals.lock();
        match totals.get_mut(name) {
            Some(total) => *total += elapsed,
            None => {
                totals.insert(name.to_string(), elapsed);
            }
        }
    }

    pub fn total(&self, name: &str) -> Option<Duration> {
        self.totals.lock().get(name).copied()
    }

    /// Writes one `<name> took <m>m <s>s <ms>ms` line per name, sorted by name
    pub fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        // Copy out so the lock is not held during IO
        let totals: Vec<(String, Duration)> = self
            .totals
            .lock()
            .iter()
            .map(|(name, total)| (name.clone(), *total))
            .collect();

        for (name, total) in totals {
            writeln!(writer, "{} took {}", name, format_duration(total))?;
        }
        Ok(())
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!(
        "{}m {}s {}ms",
        secs / 60,
        secs % 60,
        duration.subsec_millis()
    )
}

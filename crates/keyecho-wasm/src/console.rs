//! Browser console sinks: the key log writer and the `log` backend.

use std::io;

/// Line-buffered `io::Write` that emits one `console.log` per line.
#[derive(Default)]
pub struct ConsoleWriter {
    pending: Vec<u8>,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every complete line buffered so far.
    fn take_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.pending.iter().rposition(|&b| b == b'\n') else {
            return Vec::new();
        };
        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);
        String::from_utf8_lossy(&complete)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        for line in self.take_lines() {
            console_log(&line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn console_log(line: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&line.into());
    #[cfg(not(target_arch = "wasm32"))]
    println!("{line}");
}

// ─── log backend ─────────────────────────────────────────────────────────

/// Forwards `log` records to the matching console method.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{} {}] {}", record.level(), record.target(), record.args());
        #[cfg(target_arch = "wasm32")]
        {
            let msg = wasm_bindgen::JsValue::from(msg);
            match record.level() {
                log::Level::Error => web_sys::console::error_1(&msg),
                log::Level::Warn => web_sys::console::warn_1(&msg),
                log::Level::Info => web_sys::console::info_1(&msg),
                log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&msg),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{msg}");
    }

    fn flush(&self) {}
}

/// Install the console logger once. Later calls only adjust the level.
pub fn init_logging(level: log::LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Route panics to `console.error` instead of an opaque `unreachable`.
pub fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("keyecho panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_complete_lines_only() {
        let mut w = ConsoleWriter::new();
        w.pending.extend_from_slice(b"Press:- Scancode: 0x41\nModifers: ");
        assert_eq!(w.take_lines(), vec!["Press:- Scancode: 0x41".to_string()]);
        assert_eq!(w.pending, b"Modifers: ");

        w.pending.extend_from_slice(b"None\n\nnext");
        assert_eq!(w.take_lines(), vec!["Modifers: None".to_string(), String::new()]);
        assert_eq!(w.pending, b"next");
    }

    #[test]
    fn no_newline_keeps_everything_pending() {
        let mut w = ConsoleWriter::new();
        w.pending.extend_from_slice(b"partial");
        assert!(w.take_lines().is_empty());
        assert_eq!(w.pending.len(), 7);
    }
}

//! A failed model call must leave a diagnostic log entry.
//!
//! Kept in its own test binary: it installs a thread-local subscriber and reads back
//! what was written.

mod common;

#[cfg(test)]
mod failure_logging_tests {
    use super::common::ScriptedClient;
    use medreport::ReportGenerator;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("log buffer poisoned")).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .expect("log buffer poisoned")
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_failure_is_logged_and_returned() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let generator = ReportGenerator::new(ScriptedClient::failing_with_quota_error());
        let result = generator.generate("Check my labs", None, None).await;

        assert!(result.is_err());
        let output = logs.contents();
        assert!(output.contains("ERROR"), "missing error entry in: {}", output);
        assert!(output.contains("Report generation failed"), "got: {}", output);
        assert!(output.contains("Resource has been exhausted"), "got: {}", output);
    }

    #[tokio::test]
    async fn test_success_logs_no_error() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let generator = ReportGenerator::new(ScriptedClient::replying("<!DOCTYPE html>"));
        generator
            .generate("Check my labs", None, None)
            .await
            .expect("generation should succeed");

        assert!(!logs.contents().contains("ERROR"));
    }
}

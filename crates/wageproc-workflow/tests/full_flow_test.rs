//! End-to-end pass over the client workflows against a scripted server:
//! sign in, pass the route guard, upload, then watch the session lapse.

use async_trait::async_trait;
use wageproc_core::{ClientError, UploadResult};
use wageproc_session::{MemoryBackend, SessionStore};
use wageproc_workflow::{
    decide, AccessGate, AccessState, PayrollApi, RouteDecision, UploadEvent, UploadState,
    UploadWorkflow,
};

const TTL_MS: i64 = 1800 * 1000;
const NOW_MS: i64 = 1_700_000_000_000;

/// A server that accepts everything.
struct HappyServer;

#[async_trait]
impl PayrollApi for HappyServer {
    async fn check_pin(&self, _email: &str, _pin: &str) -> Result<bool, ClientError> {
        Ok(true)
    }

    async fn forgot_pin(&self, _email: &str) -> Result<(), ClientError> {
        Ok(())
    }

    async fn register_input(
        &self,
        _claim_number: &str,
        _date_loss: &str,
    ) -> Result<(), ClientError> {
        Ok(())
    }

    async fn upload_file(
        &self,
        _file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadResult, ClientError> {
        Ok(UploadResult {
            pdf_url: Some("https://server/artifacts/wages.pdf".into()),
            excel_url: None,
        })
    }
}

#[tokio::test]
async fn login_guard_upload_and_expiry() {
    let mut store = SessionStore::new(MemoryBackend::new(), TTL_MS);

    // Fresh client: the protected page is off limits.
    assert_eq!(decide(&mut store, NOW_MS), RouteDecision::RedirectToAccess);

    // Sign in.
    let mut gate = AccessGate::new(HappyServer);
    gate.submit(&mut store, "payroll@diner.example", "4821", NOW_MS)
        .await
        .unwrap();
    assert_eq!(gate.state(), &AccessState::Authenticated);

    // Guard now renders, and the upload goes through.
    assert_eq!(decide(&mut store, NOW_MS + 1000), RouteDecision::Render);

    let mut workflow = UploadWorkflow::new(HappyServer);
    workflow.select_file("toast-export.html", b"<html>rows</html>".to_vec());
    workflow.set_metadata(Some("cl00012345".into()), Some("02/29/2024".into()));

    let event = workflow.submit(&mut store, NOW_MS + 2000).await;
    let UploadEvent::Success(result) = event else {
        panic!("expected success, got {event:?}");
    };
    assert_eq!(
        result.pdf_url.as_deref(),
        Some("https://server/artifacts/wages.pdf")
    );
    assert!(matches!(workflow.state(), UploadState::Success(_)));

    // Another visit much later: the session lapsed, both boundaries agree.
    let much_later = NOW_MS + TTL_MS + 60_000;
    assert_eq!(
        decide(&mut store, much_later),
        RouteDecision::RedirectToAccess
    );
    workflow.select_file("toast-export.html", b"<html>rows</html>".to_vec());
    assert_eq!(
        workflow.submit(&mut store, much_later).await,
        UploadEvent::RedirectToAccess
    );

    // Back at the gate there is nothing left to short-circuit.
    let mut gate = AccessGate::new(HappyServer);
    assert!(!gate.try_short_circuit(&mut store, much_later));
}

//! Scripted `PayrollApi` for state-machine tests. Counts every call so
//! tests can assert that validation failures never reach the network.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wageproc_core::{ClientError, UploadResult};

use crate::PayrollApi;

#[derive(Clone, Default)]
pub(crate) struct MockApi {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    check_pin: Mutex<Option<Result<bool, ClientError>>>,
    forgot_pin: Mutex<Option<Result<(), ClientError>>>,
    register: Mutex<Option<Result<(), ClientError>>>,
    upload: Mutex<Option<Result<UploadResult, ClientError>>>,
    /// When set, every call hangs forever (for abandoned-future tests).
    never_resolves: AtomicBool,
    check_pin_calls: AtomicUsize,
    forgot_pin_calls: AtomicUsize,
    register_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    check_pin_emails: Mutex<Vec<String>>,
    register_args: Mutex<Vec<(String, String)>>,
    upload_names: Mutex<Vec<String>>,
}

impl MockApi {
    pub fn pending() -> Self {
        let api = Self::default();
        api.inner.never_resolves.store(true, Ordering::SeqCst);
        api
    }

    pub fn with_check_pin(self, response: Result<bool, ClientError>) -> Self {
        *self.inner.check_pin.lock().unwrap() = Some(response);
        self
    }

    pub fn with_forgot_pin(self, response: Result<(), ClientError>) -> Self {
        *self.inner.forgot_pin.lock().unwrap() = Some(response);
        self
    }

    pub fn with_register(self, response: Result<(), ClientError>) -> Self {
        *self.inner.register.lock().unwrap() = Some(response);
        self
    }

    pub fn with_upload(self, response: Result<UploadResult, ClientError>) -> Self {
        *self.inner.upload.lock().unwrap() = Some(response);
        self
    }

    pub fn check_pin_calls(&self) -> usize {
        self.inner.check_pin_calls.load(Ordering::SeqCst)
    }

    pub fn forgot_pin_calls(&self) -> usize {
        self.inner.forgot_pin_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.inner.register_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.inner.upload_calls.load(Ordering::SeqCst)
    }

    pub fn check_pin_emails(&self) -> Vec<String> {
        self.inner.check_pin_emails.lock().unwrap().clone()
    }

    pub fn register_args(&self) -> Vec<(String, String)> {
        self.inner.register_args.lock().unwrap().clone()
    }

    pub fn upload_names(&self) -> Vec<String> {
        self.inner.upload_names.lock().unwrap().clone()
    }

    async fn maybe_hang(&self) {
        if self.inner.never_resolves.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl PayrollApi for MockApi {
    async fn check_pin(&self, email: &str, _pin: &str) -> Result<bool, ClientError> {
        self.inner.check_pin_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .check_pin_emails
            .lock()
            .unwrap()
            .push(email.to_string());
        self.maybe_hang().await;
        self.inner
            .check_pin
            .lock()
            .unwrap()
            .clone()
            .expect("unscripted check_pin call")
    }

    async fn forgot_pin(&self, _email: &str) -> Result<(), ClientError> {
        self.inner.forgot_pin_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_hang().await;
        self.inner
            .forgot_pin
            .lock()
            .unwrap()
            .clone()
            .expect("unscripted forgot_pin call")
    }

    async fn register_input(&self, claim_number: &str, date_loss: &str) -> Result<(), ClientError> {
        self.inner.register_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .register_args
            .lock()
            .unwrap()
            .push((claim_number.to_string(), date_loss.to_string()));
        self.maybe_hang().await;
        self.inner
            .register
            .lock()
            .unwrap()
            .clone()
            .expect("unscripted register_input call")
    }

    async fn upload_file(
        &self,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadResult, ClientError> {
        self.inner.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .upload_names
            .lock()
            .unwrap()
            .push(file_name.to_string());
        self.maybe_hang().await;
        self.inner
            .upload
            .lock()
            .unwrap()
            .clone()
            .expect("unscripted upload_file call")
    }
}

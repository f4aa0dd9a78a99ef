//! Test doubles shared by the drs-app test modules.
//!
//! `MockGateway` stands in for the remote service behind the
//! `RequestGateway` seam: tests script its responses up front and assert on
//! recorded call counts afterwards. `RecordingSaver` captures save actions
//! instead of writing to disk.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use drs_core::ParsedDonation;
use drs_gateway::{GatewayError, GatewayResult, PdfPayload, RequestGateway};

use crate::save::{SaveError, SaveTarget, SavedReceipt};

/// A donation record matching the service's sample output.
pub(crate) fn sample_donation() -> ParsedDonation {
    ParsedDonation {
        receipt_number: "42".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
        charity_name: "Hope Foundation".to_string(),
        charity_number: "CH123456".to_string(),
        donor_name: "John Doe".to_string(),
        transaction_id: "TXN-12345".to_string(),
        payment_method: "Credit Card".to_string(),
        amount: 100.0,
    }
}

/// A small fake PDF payload.
pub(crate) fn pdf_payload(filename: Option<&str>) -> PdfPayload {
    PdfPayload {
        bytes: b"%PDF-1.4 test".to_vec(),
        filename: filename.map(str::to_string),
    }
}

/// Scripted in-process gateway double.
#[derive(Default)]
pub(crate) struct MockGateway {
    parse_results: Mutex<VecDeque<GatewayResult<ParsedDonation>>>,
    receipt_results: Mutex<VecDeque<GatewayResult<PdfPayload>>>,
    preview_results: Mutex<VecDeque<GatewayResult<PdfPayload>>>,
    parse_calls: AtomicUsize,
    receipt_calls: AtomicUsize,
    preview_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue_parse(&self, result: GatewayResult<ParsedDonation>) {
        self.parse_results.lock().unwrap().push_back(result);
    }

    pub fn enqueue_receipt(&self, result: GatewayResult<PdfPayload>) {
        self.receipt_results.lock().unwrap().push_back(result);
    }

    pub fn enqueue_preview(&self, result: GatewayResult<PdfPayload>) {
        self.preview_results.lock().unwrap().push_back(result);
    }

    pub fn parse_count(&self) -> usize {
        self.parse_calls.load(Ordering::SeqCst)
    }

    pub fn receipt_count(&self) -> usize {
        self.receipt_calls.load(Ordering::SeqCst)
    }

    pub fn preview_count(&self) -> usize {
        self.preview_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequestGateway for MockGateway {
    async fn parse(&self, _email_text: &str) -> GatewayResult<ParsedDonation> {
        self.parse_calls.fetch_add(1, Ordering::SeqCst);
        self.parse_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::ParseFailed))
    }

    async fn fetch_receipt(&self, _donation: &ParsedDonation) -> GatewayResult<PdfPayload> {
        self.receipt_calls.fetch_add(1, Ordering::SeqCst);
        self.receipt_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::ReceiptFailed))
    }

    async fn fetch_preview(&self, _donation: &ParsedDonation) -> GatewayResult<PdfPayload> {
        self.preview_calls.fetch_add(1, Ordering::SeqCst);
        self.preview_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayError::PreviewFailed))
    }
}

/// Save double that records actions instead of touching the file system.
#[derive(Default)]
pub(crate) struct RecordingSaver {
    saves: Mutex<Vec<SavedReceipt>>,
    fail: bool,
}

impl RecordingSaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A saver whose every save fails with an I/O error.
    pub fn failing() -> Self {
        RecordingSaver {
            saves: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn saves(&self) -> Vec<SavedReceipt> {
        self.saves.lock().unwrap().clone()
    }
}

impl SaveTarget for RecordingSaver {
    fn save(&self, filename: &str, bytes: &[u8]) -> Result<SavedReceipt, SaveError> {
        if self.fail {
            return Err(SaveError::Io(std::io::Error::other("disk full")));
        }

        let saved = SavedReceipt {
            filename: filename.to_string(),
            bytes_written: bytes.len(),
        };
        self.saves.lock().unwrap().push(saved.clone());
        Ok(saved)
    }
}

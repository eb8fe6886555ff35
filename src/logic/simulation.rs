//! Autonomous Simulation Driver
//!
//! Feeds a fixed rotation of canned email and URL samples through the real
//! analysis agents on a timer, to demonstrate unattended operation. One
//! sample per tick; tick failures are logged and the rotation continues.
//! The driver stops itself when the rotation is exhausted, or on explicit
//! stop.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::logic::agents::email::{self, EmailAnalysisRequest};
use crate::logic::agents::url::{self, UrlAnalysisRequest};
use crate::logic::agents::AgentError;
use crate::logic::analyst::Analyst;
use crate::logic::blocklist::Blocklist;
use crate::logic::store::IncidentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleKind {
    Email,
    Url,
}

struct Sample {
    kind: SampleKind,
    content: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        kind: SampleKind::Email,
        content: "From: security@paypal-alerts.com\nSubject: Suspicious Login Attempt\n\nWe noticed a login from an unrecognized device. Please verify your account immediately by clicking here: http://paypal-verify-secure.net/login",
    },
    Sample {
        kind: SampleKind::Url,
        content: "https://www.google.com/search?q=safe",
    },
    Sample {
        kind: SampleKind::Email,
        content: "From: shipping-update@fedex-express.org\nSubject: Your package delivery has failed\n\nWe were unable to deliver your package. To reschedule, please download and fill out the attached form. (attachment: delivery_form.zip)",
    },
    Sample {
        kind: SampleKind::Url,
        content: "http://bit.ly/free-gift-card-scam",
    },
    Sample {
        kind: SampleKind::Email,
        content: "From: HR <hr@your-company.com>\nSubject: Important: New Company Policy on Remote Work\n\nAll, please review the updated remote work policy document attached. Let us know if you have questions.",
    },
    Sample {
        kind: SampleKind::Url,
        content: "https://github.com",
    },
    Sample {
        kind: SampleKind::Email,
        content: "From: amazon-rewards@primedeals.info\nSubject: Congratulations! You have a $50 Amazon credit!\n\nClaim your $50 credit now by logging in through our special portal: http://amazon-claim-reward.com",
    },
    Sample {
        kind: SampleKind::Url,
        content: "http://totally-legit-antivirus-scan.com/download.exe",
    },
    Sample {
        kind: SampleKind::Email,
        content: "From: friends@facebookmail.com\nSubject: You have a new friend request\n\nJohn Doe wants to be your friend. Connect with them here: http://facebook-profiles-view.com/john-doe",
    },
    Sample {
        kind: SampleKind::Url,
        content: "https://developer.mozilla.org",
    },
    Sample {
        kind: SampleKind::Email,
        content: "From: no-reply@crypto-wallet.io\nSubject: Action Required: Your wallet has been compromised!\n\nTo secure your assets, you must re-validate your wallet immediately. Click here: http://crypto-wallet-revalidate.web.app",
    },
    Sample {
        kind: SampleKind::Url,
        content: "http://example.com/a-normal-page",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct SimulationStatus {
    pub running: bool,
    pub cursor: usize,
    pub total: usize,
}

#[derive(Clone)]
pub struct SimulationDriver {
    running: Arc<AtomicBool>,
    cursor: Arc<AtomicUsize>,
    interval: Duration,
}

impl SimulationDriver {
    pub fn new(interval_seconds: u64) -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            cursor: Arc::new(AtomicUsize::new(0)),
            interval: Duration::from_secs(interval_seconds),
        }
    }

    pub fn status(&self) -> SimulationStatus {
        SimulationStatus {
            running: self.running.load(Ordering::SeqCst),
            cursor: self.cursor.load(Ordering::SeqCst).min(SAMPLES.len()),
            total: SAMPLES.len(),
        }
    }

    /// Stop the rotation. Idempotent; in-flight ticks complete.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Start the rotation from the top. Returns false when already running.
    pub fn start(
        &self,
        analyst: Arc<dyn Analyst>,
        store: IncidentStore,
        blocklist: Blocklist,
    ) -> bool {
        if self.running.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.cursor.store(0, Ordering::SeqCst);

        let driver = self.clone();
        tokio::spawn(async move {
            tracing::info!("Simulation driver started ({} samples)", SAMPLES.len());

            loop {
                if !driver.running.load(Ordering::SeqCst) {
                    tracing::info!("Simulation driver stopped");
                    break;
                }

                let index = driver.cursor.fetch_add(1, Ordering::SeqCst);
                let Some(sample) = SAMPLES.get(index) else {
                    tracing::info!("Simulation rotation complete");
                    driver.running.store(false, Ordering::SeqCst);
                    break;
                };

                tracing::info!(
                    "Simulation tick {}/{}: analyzing {} sample",
                    index + 1,
                    SAMPLES.len(),
                    match sample.kind {
                        SampleKind::Email => "email",
                        SampleKind::Url => "URL",
                    }
                );

                // A failed tick never stops the rotation.
                if let Err(e) = run_sample(analyst.as_ref(), &store, &blocklist, sample).await {
                    tracing::warn!("Simulation tick {} failed: {}", index + 1, e);
                }

                tokio::time::sleep(driver.interval).await;
            }
        });

        true
    }
}

async fn run_sample(
    analyst: &dyn Analyst,
    store: &IncidentStore,
    blocklist: &Blocklist,
    sample: &Sample,
) -> Result<(), AgentError> {
    match sample.kind {
        SampleKind::Email => {
            let request = EmailAnalysisRequest {
                email_content: sample.content.to_string(),
                attachments: Vec::new(),
            };
            email::analyze(analyst, store, &request).await?;
        }
        SampleKind::Url => {
            let request = UrlAnalysisRequest { url: sample.content.to_string() };
            url::assess(analyst, store, blocklist, &request).await?;
        }
    }
    Ok(())
}

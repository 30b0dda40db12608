// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Parser for decoded QR payloads of `KEY=VALUE` lines. The scanner
//! itself lives outside this crate; we only see the decoded text.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

static LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^=]+)=([^=]*)$").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QrError {
    #[error("QR payload has no AMOUNT greater than zero")]
    MissingAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrPayload {
    pub amount: Decimal,
    pub comment: Option<String>,
}

/// Recognized keys are AMOUNT and COMMENT (case-insensitive); other
/// keys and malformed lines are skipped. An unparseable AMOUNT counts
/// as zero, and a payload without a positive amount is rejected whole.
pub fn parse_payload(text: &str) -> Result<QrPayload, QrError> {
    let mut amount = Decimal::ZERO;
    let mut comment = String::new();

    for line in text.lines() {
        let Some(caps) = LINE.captures(line) else {
            continue;
        };
        let key = caps[1].to_uppercase();
        let value = &caps[2];
        match key.as_str() {
            "AMOUNT" => amount = value.parse().unwrap_or(Decimal::ZERO),
            "COMMENT" => comment = value.to_string(),
            _ => {}
        }
    }

    if amount <= Decimal::ZERO {
        return Err(QrError::MissingAmount);
    }
    Ok(QrPayload {
        amount,
        comment: (!comment.is_empty()).then_some(comment),
    })
}

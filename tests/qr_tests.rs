// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use moneta::qr::{QrError, parse_payload};

#[test]
fn amount_and_comment_are_extracted() {
    let payload = parse_payload("AMOUNT=50\nCOMMENT=lunch").unwrap();
    assert_eq!(payload.amount, Decimal::from(50));
    assert_eq!(payload.comment.as_deref(), Some("lunch"));
}

#[test]
fn amount_alone_is_enough() {
    let payload = parse_payload("AMOUNT=12.75").unwrap();
    assert_eq!(payload.amount, "12.75".parse::<Decimal>().unwrap());
    assert_eq!(payload.comment, None);
}

#[test]
fn keys_are_case_insensitive() {
    let payload = parse_payload("amount=3\ncomment=tea").unwrap();
    assert_eq!(payload.amount, Decimal::from(3));
    assert_eq!(payload.comment.as_deref(), Some("tea"));
}

#[test]
fn missing_amount_rejects_the_payload() {
    assert_eq!(
        parse_payload("COMMENT=lunch"),
        Err(QrError::MissingAmount)
    );
}

#[test]
fn zero_or_garbage_amount_rejects_the_payload() {
    assert_eq!(parse_payload("AMOUNT=0"), Err(QrError::MissingAmount));
    assert_eq!(parse_payload("AMOUNT=abc"), Err(QrError::MissingAmount));
    assert_eq!(parse_payload("AMOUNT=-4"), Err(QrError::MissingAmount));
}

#[test]
fn malformed_and_unknown_lines_are_skipped() {
    let payload = parse_payload("noise\nA=B=C\nVENDOR=kiosk\nAMOUNT=8").unwrap();
    assert_eq!(payload.amount, Decimal::from(8));
    assert_eq!(payload.comment, None);
}

#[test]
fn empty_comment_is_none() {
    let payload = parse_payload("AMOUNT=5\nCOMMENT=").unwrap();
    assert_eq!(payload.comment, None);
}

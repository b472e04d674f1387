use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::IngestReport;
use crate::investments::{CreatedAt, Investment, InvestmentStatus, LedgerEvent, LedgerEventKind};
use crate::referrals::{ReferralCounts, ReferralSummary};
use crate::users::UserProfile;
use crate::utils::decimal_input::DecimalInput;
use crate::utils::time_utils::{parse_calendar_date, parse_utc_timestamp};

// ─────────────────────────────────────────────────────────────────────────────
// Wire shapes (internal, tolerant of both legacy and current field names)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInvestment {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    legacy_id: Option<Value>,
    #[serde(default)]
    forex_pair: Option<Value>,
    #[serde(default)]
    pair: Option<Value>,
    #[serde(default)]
    amount: DecimalInput,
    #[serde(default)]
    entry_price: DecimalInput,
    #[serde(default)]
    current_price: DecimalInput,
    #[serde(default, rename = "dailyROI")]
    daily_roi: DecimalInput,
    #[serde(default)]
    profit: DecimalInput,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawLedgerEvent {
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    amount: DecimalInput,
    #[serde(default, rename = "type")]
    kind: Option<Value>,
    #[serde(default)]
    balance: DecimalInput,
}

#[derive(Debug, Default, Deserialize)]
struct RawReferralStats {
    #[serde(default)]
    earnings: Option<RawReferralEarnings>,
    #[serde(default)]
    counts: Option<RawReferralCounts>,
}

#[derive(Debug, Default, Deserialize)]
struct RawReferralEarnings {
    #[serde(default)]
    total: DecimalInput,
}

#[derive(Debug, Default, Deserialize)]
struct RawReferralCounts {
    #[serde(default)]
    level1: DecimalInput,
    #[serde(default)]
    level2: DecimalInput,
    #[serde(default)]
    level3: DecimalInput,
    #[serde(default)]
    total: DecimalInput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "_id")]
    legacy_id: Option<Value>,
    #[serde(default)]
    username: Option<Value>,
    #[serde(default)]
    phone: Option<Value>,
    #[serde(default)]
    balance: DecimalInput,
    #[serde(default)]
    withdrawable: DecimalInput,
    #[serde(default)]
    referral_code: Option<Value>,
    #[serde(default)]
    is_admin: Option<Value>,
    #[serde(default)]
    is_active: Option<Value>,
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    updated_at: Option<Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Field helpers
// ─────────────────────────────────────────────────────────────────────────────

fn identifier(primary: Option<Value>, legacy: Option<Value>) -> String {
    match primary.or(legacy) {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn created_at_from(value: Option<&Value>) -> Option<CreatedAt> {
    let raw = value?.as_str()?;
    parse_utc_timestamp(raw)
        .map(CreatedAt::Instant)
        .or_else(|| parse_calendar_date(raw).map(CreatedAt::Date))
}

fn decode_record<T: DeserializeOwned>(
    record: &Value,
    source: &str,
    report: &mut IngestReport,
) -> Option<T> {
    match T::deserialize(record) {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!("Rejecting {} record: {}", source, e);
            report.rejected_records += 1;
            None
        }
    }
}

fn count_from(input: &DecimalInput, field: &str, report: &mut IngestReport) -> u32 {
    use rust_decimal::prelude::ToPrimitive;
    report.coerce(input, field).trunc().to_u32().unwrap_or(0)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public parsers
// ─────────────────────────────────────────────────────────────────────────────

/// Parses the `investments` array of `GET /investments`.
pub fn parse_investments(records: &[Value], report: &mut IngestReport) -> Vec<Investment> {
    debug!("Parsing {} investment records", records.len());
    let mut investments = Vec::with_capacity(records.len());
    for record in records {
        let Some(raw) = decode_record::<RawInvestment>(record, "investment", report) else {
            continue;
        };
        let created_at = created_at_from(raw.created_at.as_ref());
        if created_at.is_none() {
            report.undated_records += 1;
        }
        let pair = report
            .coerce_text(raw.forex_pair, "forexPair")
            .or_else(|| report.coerce_text(raw.pair, "pair"))
            .unwrap_or_default();
        let status = report
            .coerce_text(raw.status, "status")
            .map(|s| InvestmentStatus::from(s.as_str()))
            .unwrap_or_default();
        investments.push(Investment {
            id: identifier(raw.id, raw.legacy_id),
            pair,
            amount: report.coerce(&raw.amount, "amount"),
            entry_price: report.coerce(&raw.entry_price, "entryPrice"),
            current_price: report.coerce(&raw.current_price, "currentPrice"),
            daily_roi: report.coerce(&raw.daily_roi, "dailyROI"),
            profit: report.coerce(&raw.profit, "profit"),
            status,
            created_at,
        });
        report.records_read += 1;
    }
    investments
}

/// Parses the `history` array of `GET /investments/history`.
pub fn parse_history(records: &[Value], report: &mut IngestReport) -> Vec<LedgerEvent> {
    debug!("Parsing {} ledger records", records.len());
    let mut events = Vec::with_capacity(records.len());
    for record in records {
        let Some(raw) = decode_record::<RawLedgerEvent>(record, "ledger", report) else {
            continue;
        };
        let date = raw.date.as_ref().and_then(Value::as_str).and_then(|s| {
            parse_calendar_date(s).or_else(|| parse_utc_timestamp(s).map(|t| t.date_naive()))
        });
        if date.is_none() {
            report.undated_records += 1;
        }
        let kind = LedgerEventKind::from(
            report
                .coerce_text(raw.kind, "type")
                .unwrap_or_default()
                .as_str(),
        );
        if matches!(kind, LedgerEventKind::Unknown(_)) {
            report.unknown_kinds += 1;
        }
        events.push(LedgerEvent {
            date,
            amount: report.coerce(&raw.amount, "amount"),
            kind,
            balance: report.coerce(&raw.balance, "balance"),
        });
        report.records_read += 1;
    }
    events
}

/// Parses the body of `GET /referral/stats`. A missing or malformed body
/// yields the zero summary.
pub fn parse_referral_summary(body: &Value, report: &mut IngestReport) -> ReferralSummary {
    let raw: RawReferralStats =
        decode_record(body, "referral stats", report).unwrap_or_default();
    let earnings = raw.earnings.unwrap_or_default();
    let counts = raw.counts.unwrap_or_default();
    ReferralSummary {
        total_earnings: report.coerce(&earnings.total, "earnings.total"),
        counts: ReferralCounts {
            level1: count_from(&counts.level1, "counts.level1", report),
            level2: count_from(&counts.level2, "counts.level2", report),
            level3: count_from(&counts.level3, "counts.level3", report),
            total: count_from(&counts.total, "counts.total", report),
        },
    }
}

/// Parses the `user` object of the auth endpoints.
pub fn parse_user_profile(user: &Value, report: &mut IngestReport) -> Option<UserProfile> {
    let raw: RawUser = decode_record(user, "user", report)?;
    report.records_read += 1;
    Some(UserProfile {
        id: identifier(raw.id, raw.legacy_id),
        username: report.coerce_text(raw.username, "username").unwrap_or_default(),
        phone: report.coerce_text(raw.phone, "phone").unwrap_or_default(),
        balance: report.coerce(&raw.balance, "balance"),
        withdrawable: report.coerce(&raw.withdrawable, "withdrawable"),
        referral_code: report.coerce_text(raw.referral_code, "referralCode"),
        is_admin: report.coerce_flag(raw.is_admin, "isAdmin").unwrap_or(false),
        is_active: report.coerce_flag(raw.is_active, "isActive").unwrap_or(true),
        created_at: raw
            .created_at
            .as_ref()
            .and_then(Value::as_str)
            .and_then(parse_utc_timestamp),
        updated_at: raw
            .updated_at
            .as_ref()
            .and_then(Value::as_str)
            .and_then(parse_utc_timestamp),
    })
}

//! 매매 기록 저장소.
//!
//! 분석 엔진은 저장소를 알지 못합니다. 호출자가 기록을 추가/수정/삭제한 뒤
//! `list()` 결과를 분석 함수에 다시 넘기는 구조입니다.
//!
//! 매도 정보 불변식(전부 입력 또는 전부 비움, 매도 수량 ≤ 매수 수량,
//! 매도일 ≥ 매수일)은 이 모듈에서만 검사합니다.

mod json_file;
mod memory;

pub use json_file::JsonTradeLog;
pub use memory::InMemoryTradeLog;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::TradeRecord;
use crate::error::{JournalError, JournalResult};
use crate::types::Price;

/// 매매 기록 저장소 인터페이스.
pub trait TradeLogRepository {
    /// 저장된 순서대로 모든 기록을 반환합니다.
    fn list(&self) -> JournalResult<Vec<TradeRecord>>;

    /// ID로 기록을 조회합니다.
    fn get(&self, id: &str) -> JournalResult<TradeRecord>;

    /// 새 기록을 추가합니다.
    fn add(&mut self, input: NewTradeLog) -> JournalResult<TradeRecord>;

    /// 기존 기록을 수정합니다.
    fn update(&mut self, id: &str, patch: TradeLogPatch) -> JournalResult<TradeRecord>;

    /// 기록을 삭제하고 삭제된 기록을 반환합니다.
    fn delete(&mut self, id: &str) -> JournalResult<TradeRecord>;
}

/// 저장 가능한 최대 단가 (1,000조).
pub const MAX_PRICE: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// 저장 가능한 최대 수량 (1조).
pub const MAX_QUANTITY: u64 = 1_000_000_000_000;

// ==================== 입력 타입 ====================

fn validate_non_negative_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_price")
            .with_message("가격은 0 이상이어야 합니다".into()));
    }
    if *value > MAX_PRICE {
        return Err(ValidationError::new("price_too_large")
            .with_message("가격이 허용 범위를 넘었습니다".into()));
    }
    Ok(())
}

/// 새 매매 기록 입력.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTradeLog {
    #[validate(length(min = 1, max = 20, message = "종목 코드는 1-20자여야 합니다"))]
    pub symbol: String,
    #[validate(length(min = 1, max = 100, message = "종목명은 1-100자여야 합니다"))]
    pub name: String,
    #[validate(custom(function = "validate_non_negative_price"))]
    pub buy_price: Price,
    #[validate(range(
        min = 1,
        max = 1_000_000_000_000u64,
        message = "매수 수량은 1 이상 1조 이하여야 합니다"
    ))]
    pub buy_quantity: u64,
    pub buy_date: NaiveDate,
    #[serde(default)]
    #[validate(custom(function = "validate_non_negative_price"))]
    pub sell_price: Option<Price>,
    #[serde(default)]
    #[validate(range(
        min = 1,
        max = 1_000_000_000_000u64,
        message = "매도 수량은 1 이상 1조 이하여야 합니다"
    ))]
    pub sell_quantity: Option<u64>,
    #[serde(default)]
    pub sell_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(length(max = 2000, message = "매매 근거는 2000자 이하여야 합니다"))]
    pub rationale: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl NewTradeLog {
    /// 매수 정보만 있는 입력을 생성합니다.
    pub fn buy(
        symbol: impl Into<String>,
        name: impl Into<String>,
        buy_price: Price,
        buy_quantity: u64,
        buy_date: NaiveDate,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            buy_price,
            buy_quantity,
            buy_date,
            sell_price: None,
            sell_quantity: None,
            sell_date: None,
            rationale: None,
            tags: BTreeSet::new(),
        }
    }

    /// 매도 정보를 설정합니다.
    pub fn sold(mut self, price: Price, quantity: u64, date: NaiveDate) -> Self {
        self.sell_price = Some(price);
        self.sell_quantity = Some(quantity);
        self.sell_date = Some(date);
        self
    }

    fn into_record(self, id: String) -> TradeRecord {
        TradeRecord {
            id,
            symbol: self.symbol,
            name: self.name,
            buy_price: self.buy_price,
            buy_quantity: self.buy_quantity,
            buy_date: self.buy_date,
            sell_price: self.sell_price,
            sell_quantity: self.sell_quantity,
            sell_date: self.sell_date,
            rationale: self.rationale,
            tags: self.tags,
        }
    }
}

/// 매매 기록 수정 입력.
///
/// `Some`인 필드만 덮어씁니다. `reopen`이 참이면 매도 정보를 모두 지웁니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TradeLogPatch {
    #[validate(length(min = 1, max = 100, message = "종목명은 1-100자여야 합니다"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_non_negative_price"))]
    pub buy_price: Option<Price>,
    #[validate(range(
        min = 1,
        max = 1_000_000_000_000u64,
        message = "매수 수량은 1 이상 1조 이하여야 합니다"
    ))]
    pub buy_quantity: Option<u64>,
    pub buy_date: Option<NaiveDate>,
    #[validate(custom(function = "validate_non_negative_price"))]
    pub sell_price: Option<Price>,
    #[validate(range(
        min = 1,
        max = 1_000_000_000_000u64,
        message = "매도 수량은 1 이상 1조 이하여야 합니다"
    ))]
    pub sell_quantity: Option<u64>,
    pub sell_date: Option<NaiveDate>,
    pub rationale: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    #[serde(default)]
    pub reopen: bool,
}

impl TradeLogPatch {
    /// 매도 정보를 입력하는 수정 (포지션 청산).
    pub fn close(price: Price, quantity: u64, date: NaiveDate) -> Self {
        Self {
            sell_price: Some(price),
            sell_quantity: Some(quantity),
            sell_date: Some(date),
            ..Default::default()
        }
    }

    fn apply(self, record: &mut TradeRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(price) = self.buy_price {
            record.buy_price = price;
        }
        if let Some(quantity) = self.buy_quantity {
            record.buy_quantity = quantity;
        }
        if let Some(date) = self.buy_date {
            record.buy_date = date;
        }
        if self.reopen {
            record.sell_price = None;
            record.sell_quantity = None;
            record.sell_date = None;
        }
        if self.sell_price.is_some() {
            record.sell_price = self.sell_price;
        }
        if self.sell_quantity.is_some() {
            record.sell_quantity = self.sell_quantity;
        }
        if self.sell_date.is_some() {
            record.sell_date = self.sell_date;
        }
        if let Some(rationale) = self.rationale {
            record.rationale = Some(rationale);
        }
        if let Some(tags) = self.tags {
            record.tags = tags;
        }
    }
}

// ==================== 불변식 검사 ====================

fn check_range(label: &str, price: Price, quantity: u64) -> JournalResult<()> {
    if price > MAX_PRICE || price < -MAX_PRICE {
        return Err(JournalError::Validation(format!(
            "{} 가격({})이 허용 범위를 넘었습니다",
            label, price
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(JournalError::Validation(format!(
            "{} 수량({})이 허용 범위를 넘었습니다",
            label, quantity
        )));
    }
    Ok(())
}

/// 저장 직전 기록의 매도 정보 불변식을 검사합니다.
///
/// 단가는 ±[`MAX_PRICE`], 수량은 [`MAX_QUANTITY`] 이내여야 합니다.
pub fn check_record(record: &TradeRecord) -> JournalResult<()> {
    if record.buy_quantity == 0 {
        return Err(JournalError::Validation("매수 수량은 1 이상이어야 합니다".into()));
    }
    check_range("매수", record.buy_price, record.buy_quantity)?;

    if !record.has_any_sell_field() {
        return Ok(());
    }

    let Some(leg) = record.sell_leg() else {
        return Err(JournalError::Validation(
            "매도 가격, 수량, 날짜는 모두 입력하거나 모두 비워야 합니다".into(),
        ));
    };

    check_range("매도", leg.price, leg.quantity)?;

    if leg.quantity > record.buy_quantity {
        return Err(JournalError::Validation(format!(
            "매도 수량({})이 매수 수량({})보다 많습니다",
            leg.quantity, record.buy_quantity
        )));
    }

    if leg.date < record.buy_date {
        return Err(JournalError::Validation(format!(
            "매도일({})이 매수일({})보다 빠릅니다",
            leg.date, record.buy_date
        )));
    }

    Ok(())
}

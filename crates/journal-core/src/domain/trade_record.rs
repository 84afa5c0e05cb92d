//! 매매 기록.
//!
//! 이 모듈은 사용자가 입력한 매매 기록 관련 타입을 정의합니다:
//! - `TradeRecord` - 저장소에 보관되는 매수/매도 기록
//! - `SellLeg` - 완전히 입력된 매도 정보
//! - `is_closed` - 청산 거래 판정 (분석, 목록, 상세 화면에서 공통 사용)

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{amount_of, rate_pct, Amount, Percentage, Price};

/// 사용자가 입력한 매매 기록.
///
/// 매도 정보 세 필드(가격, 수량, 날짜)는 모두 있거나 모두 없어야 하지만,
/// 분석 엔진은 일부만 채워진 기록을 미청산으로 간주할 뿐 검증하지 않습니다.
/// 검증은 저장소([`crate::store`])에서 수행합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// 고유 ID
    pub id: String,
    /// 종목 코드 (예: "005930")
    pub symbol: String,
    /// 종목명
    pub name: String,
    /// 매수 단가
    pub buy_price: Price,
    /// 매수 수량
    pub buy_quantity: u64,
    /// 매수일
    pub buy_date: NaiveDate,
    /// 매도 단가
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<Price>,
    /// 매도 수량
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_quantity: Option<u64>,
    /// 매도일
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_date: Option<NaiveDate>,
    /// 매매 근거 메모
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// 매매 근거 태그
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

/// 완전히 입력된 매도 정보.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellLeg {
    pub price: Price,
    pub quantity: u64,
    pub date: NaiveDate,
}

impl SellLeg {
    /// 총 매도 금액 (매도가 × 매도 수량).
    pub fn amount(&self) -> Amount {
        amount_of(self.price, self.quantity)
    }
}

/// 청산 거래인지 판정합니다.
///
/// 매도 가격, 수량, 날짜가 모두 있을 때만 청산으로 봅니다.
pub fn is_closed(record: &TradeRecord) -> bool {
    record.sell_leg().is_some()
}

impl TradeRecord {
    /// 매수 정보만 있는 미청산 기록을 생성합니다.
    pub fn open(
        id: impl Into<String>,
        symbol: impl Into<String>,
        name: impl Into<String>,
        buy_price: Price,
        buy_quantity: u64,
        buy_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
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
    pub fn with_sell(mut self, price: Price, quantity: u64, date: NaiveDate) -> Self {
        self.sell_price = Some(price);
        self.sell_quantity = Some(quantity);
        self.sell_date = Some(date);
        self
    }

    /// 세 필드가 모두 있을 때만 매도 정보를 반환합니다.
    pub fn sell_leg(&self) -> Option<SellLeg> {
        match (self.sell_price, self.sell_quantity, self.sell_date) {
            (Some(price), Some(quantity), Some(date)) => Some(SellLeg {
                price,
                quantity,
                date,
            }),
            _ => None,
        }
    }

    /// 매도 정보 중 하나라도 입력되었는지 여부.
    pub fn has_any_sell_field(&self) -> bool {
        self.sell_price.is_some() || self.sell_quantity.is_some() || self.sell_date.is_some()
    }

    /// 청산 거래 여부.
    pub fn is_closed(&self) -> bool {
        is_closed(self)
    }

    /// 매수일에 매도까지 완료된 당일 매매인지 여부.
    pub fn is_day_trade(&self) -> bool {
        self.sell_leg()
            .map(|leg| leg.date == self.buy_date)
            .unwrap_or(false)
    }

    /// 투자 원금 (매수가 × 매수 수량).
    pub fn investment_principal(&self) -> Amount {
        amount_of(self.buy_price, self.buy_quantity)
    }

    /// 청산 거래의 수익률 (%).
    ///
    /// 미청산이거나 원금이 0이면 `None`입니다.
    pub fn profit_rate(&self) -> Option<Percentage> {
        let leg = self.sell_leg()?;
        let principal = self.investment_principal();
        if principal.is_zero() {
            return None;
        }
        Some(rate_pct(leg.amount().saturating_sub(principal), principal))
    }
}

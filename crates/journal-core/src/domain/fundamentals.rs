//! 재무 지표 스냅샷.
//!
//! 외부 시세 제공자는 PER/PBR을 바로 주기도 하고, 종가와 EPS/BPS 같은
//! 원재료만 주기도 합니다. 후자의 경우 여기서 비율을 계산합니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ValuationIndicator;
use crate::types::{safe_div, Price};

/// 가치/성장 분류에 사용하는 세 가지 밸류에이션 지표.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub per: Decimal,
    pub pbr: Decimal,
    pub eps: Decimal,
}

impl Fundamentals {
    pub fn new(per: Decimal, pbr: Decimal, eps: Decimal) -> Self {
        Self { per, pbr, eps }
    }

    /// 일자별 스냅샷에서 PER/PBR을 계산합니다.
    ///
    /// PER = 종가 / EPS, PBR = 종가 / BPS. 분모가 0이면 해당 비율은 0입니다.
    pub fn from_snapshot(snapshot: &FundamentalSnapshot) -> Self {
        let bps = snapshot.effective_bps();
        Self {
            per: safe_div(snapshot.close_price, snapshot.eps),
            pbr: safe_div(snapshot.close_price, bps),
            eps: snapshot.eps,
        }
    }

    /// 지표 값을 조회합니다.
    pub fn value(&self, indicator: ValuationIndicator) -> Decimal {
        match indicator {
            ValuationIndicator::Per => self.per,
            ValuationIndicator::Pbr => self.pbr,
            ValuationIndicator::Eps => self.eps,
        }
    }
}

/// 특정 일자의 시세 및 재무 원재료.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundamentalSnapshot {
    /// 기준일 (없으면 최신값)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// 종가
    pub close_price: Price,
    /// 거래량
    #[serde(default)]
    pub volume: u64,
    /// 주당순이익
    #[serde(default)]
    pub eps: Decimal,
    /// 주당순자산
    #[serde(default)]
    pub bps: Decimal,
    /// BPS가 비어 있을 때 역산에 쓰는 현재가
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Price>,
    /// BPS가 비어 있을 때 역산에 쓰는 현재 PBR
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_pbr: Option<Decimal>,
}

impl FundamentalSnapshot {
    pub fn new(close_price: Price, eps: Decimal, bps: Decimal) -> Self {
        Self {
            date: None,
            close_price,
            volume: 0,
            eps,
            bps,
            current_price: None,
            current_pbr: None,
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// BPS. 제공자가 0을 주면 현재가 / 현재 PBR로 역산합니다.
    pub fn effective_bps(&self) -> Decimal {
        if !self.bps.is_zero() {
            return self.bps;
        }
        match (self.current_price, self.current_pbr) {
            (Some(price), Some(pbr)) if pbr > Decimal::ZERO => price / pbr,
            _ => Decimal::ZERO,
        }
    }
}

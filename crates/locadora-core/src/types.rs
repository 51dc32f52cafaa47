//! # Domain Types
//!
//! Records supplied by the rental backend, in the shape the dashboard
//! receives them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  PricingRule    │   │   StockItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name, marca    │   │  dayIni..dayFin │   │  product_id     │       │
//! │  │  5 base rates   │   │  campo          │   │  status         │       │
//! │  └─────────────────┘   │  operador/valor │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────────────────┐   ┌─────────────────────────────┐     │
//! │  │          Lease              │   │         LeaseItem           │     │
//! │  │  ─────────────────────────  │   │  ─────────────────────────  │     │
//! │  │  client, dates, status      │──►│  periodo_cobranca, dias     │     │
//! │  │  frete / multa / desconto   │   │  unit + negotiated rates    │     │
//! │  └─────────────────────────────┘   │  valor_total (override)     │     │
//! │                                    └─────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partially-populated records
//! The backend sends numbers as numbers, strings or `null` depending on the
//! endpoint. Every such field is an `Option` read through the lenient
//! helpers in [`crate::coerce`]; defaulting to zero happens in accessor
//! methods, never during deserialization.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coerce;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Billing Period
// =============================================================================

/// The unit a rental is charged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[serde(alias = "daily")]
    Diario,
    #[serde(alias = "weekly")]
    Semanal,
    #[serde(alias = "fortnightly")]
    Quinzenal,
    #[serde(alias = "monthly")]
    Mensal,
    #[serde(alias = "annual")]
    Anual,
}

impl BillingPeriod {
    /// All periods, in the order the lease form lists them.
    pub const ALL: [BillingPeriod; 5] = [
        BillingPeriod::Diario,
        BillingPeriod::Semanal,
        BillingPeriod::Quinzenal,
        BillingPeriod::Mensal,
        BillingPeriod::Anual,
    ];

    /// Wire name (`diario`, `semanal`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Diario => "diario",
            BillingPeriod::Semanal => "semanal",
            BillingPeriod::Quinzenal => "quinzenal",
            BillingPeriod::Mensal => "mensal",
            BillingPeriod::Anual => "anual",
        }
    }

    /// Human label used on invoices.
    pub const fn label(&self) -> &'static str {
        match self {
            BillingPeriod::Diario => "Diário",
            BillingPeriod::Semanal => "Semanal",
            BillingPeriod::Quinzenal => "Quinzenal",
            BillingPeriod::Mensal => "Mensal",
            BillingPeriod::Anual => "Anual",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingPeriod {
    type Err = ValidationError;

    /// Case-insensitive; accepts the Portuguese wire names, their accented
    /// spellings and the English aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diario" | "diário" | "daily" => Ok(BillingPeriod::Diario),
            "semanal" | "weekly" => Ok(BillingPeriod::Semanal),
            "quinzenal" | "fortnightly" => Ok(BillingPeriod::Quinzenal),
            "mensal" | "monthly" => Ok(BillingPeriod::Mensal),
            "anual" | "annual" => Ok(BillingPeriod::Anual),
            _ => Err(ValidationError::NotAllowed {
                field: "periodo_cobranca".to_string(),
                allowed: BillingPeriod::ALL
                    .iter()
                    .map(|p| p.as_str().to_string())
                    .collect(),
            }),
        }
    }
}

// =============================================================================
// Rate Table
// =============================================================================

/// One optional rate per billing period.
///
/// Products carry one table (base rates); lease items carry two (unit and
/// negotiated). The wire names differ per record, so the table is built by
/// accessor methods rather than deserialized directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateTable {
    pub diario: Option<Money>,
    pub semanal: Option<Money>,
    pub quinzenal: Option<Money>,
    pub mensal: Option<Money>,
    pub anual: Option<Money>,
}

impl RateTable {
    /// The rate for `period`, if present.
    pub fn get(&self, period: BillingPeriod) -> Option<Money> {
        match period {
            BillingPeriod::Diario => self.diario,
            BillingPeriod::Semanal => self.semanal,
            BillingPeriod::Quinzenal => self.quinzenal,
            BillingPeriod::Mensal => self.mensal,
            BillingPeriod::Anual => self.anual,
        }
    }

    /// The rate for `period`, absent rates read as zero.
    #[inline]
    pub fn rate(&self, period: BillingPeriod) -> Money {
        self.get(period).unwrap_or_default()
    }

    pub fn set(&mut self, period: BillingPeriod, value: Option<Money>) {
        let slot = match period {
            BillingPeriod::Diario => &mut self.diario,
            BillingPeriod::Semanal => &mut self.semanal,
            BillingPeriod::Quinzenal => &mut self.quinzenal,
            BillingPeriod::Mensal => &mut self.mensal,
            BillingPeriod::Anual => &mut self.anual,
        };
        *slot = value;
    }

    /// True when no period has a rate.
    pub fn is_empty(&self) -> bool {
        BillingPeriod::ALL.iter().all(|p| self.get(*p).is_none())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A rentable product as registered in the admin forms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    #[serde(default, deserialize_with = "coerce::id_or_empty")]
    pub id: String,

    #[serde(default, alias = "nome")]
    pub name: String,

    /// Brand. Together with `name` it forms the invoice grouping key.
    #[serde(default)]
    pub marca: String,

    #[serde(default, deserialize_with = "coerce::lenient_money")]
    pub daily_value: Option<Money>,

    #[serde(default, deserialize_with = "coerce::lenient_money")]
    pub weekly_value: Option<Money>,

    /// Not every backend endpoint includes this field.
    #[serde(default, deserialize_with = "coerce::lenient_money")]
    pub fortnightly_value: Option<Money>,

    #[serde(default, deserialize_with = "coerce::lenient_money")]
    pub monthly_value: Option<Money>,

    #[serde(default, deserialize_with = "coerce::lenient_money")]
    pub annual_value: Option<Money>,
}

impl Product {
    /// Base rates as a table.
    pub fn base_rates(&self) -> RateTable {
        RateTable {
            diario: self.daily_value,
            semanal: self.weekly_value,
            quinzenal: self.fortnightly_value,
            mensal: self.monthly_value,
            anual: self.annual_value,
        }
    }

    /// Frozen identity for lease items.
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            name: self.name.clone(),
            marca: self.marca.clone(),
        }
    }
}

/// Product identity frozen into a lease item when it is added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default)]
    pub marca: String,
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// Arithmetic operator of a pricing rule.
///
/// Unknown symbols are kept verbatim so a rule with a typo still loads;
/// the rate adjuster passes the base rate through for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Percent,
    Unknown(String),
}

impl RuleOperator {
    pub fn symbol(&self) -> &str {
        match self {
            RuleOperator::Add => "+",
            RuleOperator::Subtract => "-",
            RuleOperator::Multiply => "*",
            RuleOperator::Divide => "/",
            RuleOperator::Percent => "%",
            RuleOperator::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, RuleOperator::Unknown(_))
    }
}

impl Default for RuleOperator {
    fn default() -> Self {
        RuleOperator::Unknown(String::new())
    }
}

impl From<String> for RuleOperator {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "+" => RuleOperator::Add,
            "-" => RuleOperator::Subtract,
            "*" | "x" => RuleOperator::Multiply,
            "/" => RuleOperator::Divide,
            "%" => RuleOperator::Percent,
            _ => RuleOperator::Unknown(raw),
        }
    }
}

impl From<&str> for RuleOperator {
    fn from(raw: &str) -> Self {
        RuleOperator::from(raw.to_string())
    }
}

impl From<RuleOperator> for String {
    fn from(op: RuleOperator) -> Self {
        op.symbol().to_string()
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A duration-bracketed adjustment applied to one billing period's rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingRule {
    #[serde(default, deserialize_with = "coerce::id_or_empty")]
    pub id: String,

    /// First day of the bracket (inclusive).
    #[serde(rename = "dayIni", default, deserialize_with = "coerce::days_or_zero")]
    pub day_ini: u32,

    /// Last day of the bracket (inclusive).
    #[serde(rename = "dayFin", default, deserialize_with = "coerce::days_or_zero")]
    pub day_fin: u32,

    /// Billing period whose rate the rule adjusts.
    #[serde(deserialize_with = "coerce::rule_period")]
    pub campo: BillingPeriod,

    /// Missing operators load as unknown and leave the base rate untouched.
    #[serde(default)]
    #[ts(type = "string")]
    pub operador: RuleOperator,

    #[serde(default, deserialize_with = "coerce::decimal_or_zero")]
    #[ts(type = "number")]
    pub valor: Decimal,

    #[serde(default, deserialize_with = "coerce::lenient_flag")]
    pub active: bool,
}

impl PricingRule {
    /// Whether this rule applies to a rental of `days` days.
    #[inline]
    pub fn covers(&self, days: u32) -> bool {
        self.active && days >= self.day_ini && days <= self.day_fin
    }

    /// Whether the day ranges of two rules intersect.
    pub fn overlaps(&self, other: &PricingRule) -> bool {
        self.day_ini <= other.day_fin && other.day_ini <= self.day_fin
    }
}

// =============================================================================
// Stock (Patrimony)
// =============================================================================

/// Availability of a physical unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    Disponivel,
    Alugado,
    Manutencao,
    Reservado,
    Other(String),
}

impl StockStatus {
    pub fn as_str(&self) -> &str {
        match self {
            StockStatus::Disponivel => "Disponível",
            StockStatus::Alugado => "Alugado",
            StockStatus::Manutencao => "Manutenção",
            StockStatus::Reservado => "Reservado",
            StockStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for StockStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "disponivel" | "disponível" | "available" => StockStatus::Disponivel,
            "alugado" | "rented" => StockStatus::Alugado,
            "manutencao" | "manutenção" | "maintenance" => StockStatus::Manutencao,
            "reservado" | "reserved" => StockStatus::Reservado,
            _ => StockStatus::Other(raw),
        }
    }
}

impl From<StockStatus> for String {
    fn from(status: StockStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physically trackable unit of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockItem {
    #[serde(default, deserialize_with = "coerce::id_or_empty")]
    pub id: String,

    #[serde(rename = "produto_id", alias = "product_id", default, deserialize_with = "coerce::id_or_empty")]
    pub product_id: String,

    #[ts(type = "string")]
    pub status: StockStatus,
}

impl StockItem {
    /// Only available units can be added to a lease.
    pub fn is_rentable(&self) -> bool {
        self.status == StockStatus::Disponivel
    }
}

// =============================================================================
// Lease Item
// =============================================================================

/// One rented stock unit within a lease.
///
/// Carries both the product's unit rates at the time it was added and the
/// negotiated rates after the pricing rule was applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaseItem {
    #[serde(rename = "patrimonio_id", alias = "stock_id", default, deserialize_with = "coerce::lenient_id")]
    pub stock_id: Option<String>,

    #[serde(rename = "produto", alias = "product", default)]
    pub product: Option<ProductSnapshot>,

    #[serde(rename = "periodo_cobranca", default, deserialize_with = "coerce::lenient_period")]
    pub billing_period: Option<BillingPeriod>,

    #[serde(rename = "quantidade_dias", default, deserialize_with = "coerce::lenient_days")]
    pub days: Option<u32>,

    #[serde(rename = "valor_unitario_diario", default, deserialize_with = "coerce::lenient_money")]
    pub unit_diario: Option<Money>,
    #[serde(rename = "valor_unitario_semanal", default, deserialize_with = "coerce::lenient_money")]
    pub unit_semanal: Option<Money>,
    #[serde(rename = "valor_unitario_quinzenal", default, deserialize_with = "coerce::lenient_money")]
    pub unit_quinzenal: Option<Money>,
    #[serde(rename = "valor_unitario_mensal", default, deserialize_with = "coerce::lenient_money")]
    pub unit_mensal: Option<Money>,
    #[serde(rename = "valor_unitario_anual", default, deserialize_with = "coerce::lenient_money")]
    pub unit_anual: Option<Money>,

    #[serde(rename = "valor_negociado_diario", default, deserialize_with = "coerce::lenient_money")]
    pub negotiated_diario: Option<Money>,
    #[serde(rename = "valor_negociado_semanal", default, deserialize_with = "coerce::lenient_money")]
    pub negotiated_semanal: Option<Money>,
    #[serde(rename = "valor_negociado_quinzenal", default, deserialize_with = "coerce::lenient_money")]
    pub negotiated_quinzenal: Option<Money>,
    #[serde(rename = "valor_negociado_mensal", default, deserialize_with = "coerce::lenient_money")]
    pub negotiated_mensal: Option<Money>,
    #[serde(rename = "valor_negociado_anual", default, deserialize_with = "coerce::lenient_money")]
    pub negotiated_anual: Option<Money>,

    /// Manually edited line total.
    #[serde(rename = "valor_total", default, deserialize_with = "coerce::lenient_money")]
    pub total_override: Option<Money>,
}

impl LeaseItem {
    pub fn unit_rates(&self) -> RateTable {
        RateTable {
            diario: self.unit_diario,
            semanal: self.unit_semanal,
            quinzenal: self.unit_quinzenal,
            mensal: self.unit_mensal,
            anual: self.unit_anual,
        }
    }

    pub fn set_unit_rates(&mut self, rates: RateTable) {
        self.unit_diario = rates.diario;
        self.unit_semanal = rates.semanal;
        self.unit_quinzenal = rates.quinzenal;
        self.unit_mensal = rates.mensal;
        self.unit_anual = rates.anual;
    }

    pub fn negotiated_rates(&self) -> RateTable {
        RateTable {
            diario: self.negotiated_diario,
            semanal: self.negotiated_semanal,
            quinzenal: self.negotiated_quinzenal,
            mensal: self.negotiated_mensal,
            anual: self.negotiated_anual,
        }
    }

    pub fn set_negotiated_rates(&mut self, rates: RateTable) {
        self.negotiated_diario = rates.diario;
        self.negotiated_semanal = rates.semanal;
        self.negotiated_quinzenal = rates.quinzenal;
        self.negotiated_mensal = rates.mensal;
        self.negotiated_anual = rates.anual;
    }

    /// Day count used for billing; unset or zero bills one day.
    #[inline]
    pub fn billed_days(&self) -> u32 {
        match self.days {
            Some(days) if days > 0 => days,
            _ => 1,
        }
    }

    /// Negotiated rate of the chosen billing period; zero if the period is
    /// unset or the rate is absent.
    pub fn negotiated_rate(&self) -> Money {
        self.billing_period
            .map(|period| self.negotiated_rates().rate(period))
            .unwrap_or_default()
    }

    /// The manual total, when one was entered and is positive.
    pub fn manual_total(&self) -> Option<Money> {
        self.total_override.filter(Money::is_positive)
    }

    /// Grouping key on invoices: `(name, brand)`.
    pub fn group_key(&self) -> (&str, &str) {
        match &self.product {
            Some(p) => (p.name.as_str(), p.marca.as_str()),
            None => ("", ""),
        }
    }
}

// =============================================================================
// Lease
// =============================================================================

/// Lifecycle of a lease contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    /// Created on submission; the only non-terminal state.
    #[default]
    #[serde(alias = "Ativo", alias = "ATIVO", alias = "active")]
    Ativo,
    #[serde(alias = "Finalizado", alias = "FINALIZADO", alias = "finalized")]
    Finalizado,
    #[serde(alias = "Cancelado", alias = "CANCELADO", alias = "cancelled")]
    Cancelado,
}

impl LeaseStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaseStatus::Ativo)
    }
}

/// A rental contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Lease {
    #[serde(default, deserialize_with = "coerce::lenient_id")]
    pub id: Option<String>,

    #[serde(rename = "cliente_id", alias = "client_id", default, deserialize_with = "coerce::lenient_id")]
    pub client_id: Option<String>,

    #[serde(rename = "endereco_entrega", default)]
    pub delivery_address: Option<String>,

    #[serde(rename = "data_inicio", default, deserialize_with = "coerce::lenient_date")]
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,

    #[serde(rename = "data_prevista_devolucao", default, deserialize_with = "coerce::lenient_date")]
    #[ts(as = "Option<String>")]
    pub expected_return_date: Option<NaiveDate>,

    #[serde(rename = "data_devolucao", default, deserialize_with = "coerce::lenient_date")]
    #[ts(as = "Option<String>")]
    pub actual_return_date: Option<NaiveDate>,

    #[serde(rename = "data_pagamento", default, deserialize_with = "coerce::lenient_date")]
    #[ts(as = "Option<String>")]
    pub payment_date: Option<NaiveDate>,

    #[serde(rename = "leaseItems", default)]
    pub items: Vec<LeaseItem>,

    #[serde(rename = "valor_frete", default, deserialize_with = "coerce::lenient_money")]
    pub freight: Option<Money>,

    #[serde(rename = "valor_multa", default, deserialize_with = "coerce::lenient_money")]
    pub fine: Option<Money>,

    #[serde(rename = "valor_desconto", default, deserialize_with = "coerce::lenient_money")]
    pub discount: Option<Money>,

    #[serde(default)]
    pub status: LeaseStatus,
}

// =============================================================================
// Unit Tests
// =============================================================================

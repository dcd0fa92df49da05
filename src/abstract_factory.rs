// Pattern 1: Abstract Factory
// One factory per family of related services; the cart never names a concrete type.

use std::fmt;
use std::str::FromStr;

use crate::config::DEFAULT_ORDER_COSTS;
use crate::error::{PatternError, Result};
use crate::sink::DisplaySink;

// ============================================================================
// Products
// ============================================================================

pub trait DiscountService {
    fn discount_percentage(&self) -> u32;
}

pub trait ShippingCostsService {
    fn shipping_costs(&self) -> u64;
}

#[derive(Debug, Clone, Copy)]
pub struct BelgiumDiscountService;
impl DiscountService for BelgiumDiscountService {
    fn discount_percentage(&self) -> u32 {
        20
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FranceDiscountService;
impl DiscountService for FranceDiscountService {
    fn discount_percentage(&self) -> u32 {
        10
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BelgiumShippingCostsService;
impl ShippingCostsService for BelgiumShippingCostsService {
    fn shipping_costs(&self) -> u64 {
        20
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FranceShippingCostsService;
impl ShippingCostsService for FranceShippingCostsService {
    fn shipping_costs(&self) -> u64 {
        25
    }
}

// ============================================================================
// Factories
// ============================================================================

pub trait PurchaseFactory {
    fn create_discount_service(&self) -> Box<dyn DiscountService>;
    fn create_shipping_costs_service(&self) -> Box<dyn ShippingCostsService>;
}

#[derive(Debug, Clone, Copy)]
pub struct BelgiumPurchaseFactory;
impl PurchaseFactory for BelgiumPurchaseFactory {
    fn create_discount_service(&self) -> Box<dyn DiscountService> {
        Box::new(BelgiumDiscountService)
    }

    fn create_shipping_costs_service(&self) -> Box<dyn ShippingCostsService> {
        Box::new(BelgiumShippingCostsService)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FrancePurchaseFactory;
impl PurchaseFactory for FrancePurchaseFactory {
    fn create_discount_service(&self) -> Box<dyn DiscountService> {
        Box::new(FranceDiscountService)
    }

    fn create_shipping_costs_service(&self) -> Box<dyn ShippingCostsService> {
        Box::new(FranceShippingCostsService)
    }
}

// ============================================================================
// Family selector
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Belgium,
    France,
}

impl Family {
    pub const ALL: [Family; 2] = [Family::Belgium, Family::France];

    pub fn code(self) -> &'static str {
        match self {
            Family::Belgium => "BE",
            Family::France => "FR",
        }
    }

    pub fn factory(self) -> Box<dyn PurchaseFactory> {
        match self {
            Family::Belgium => Box::new(BelgiumPurchaseFactory),
            Family::France => Box::new(FrancePurchaseFactory),
        }
    }
}

impl FromStr for Family {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim();
        Family::ALL
            .into_iter()
            .find(|family| family.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| PatternError::unsupported_family(s))
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Both services always come from the same factory, so they stay consistent.
pub fn create_family(
    selector: &str,
) -> Result<(Box<dyn DiscountService>, Box<dyn ShippingCostsService>)> {
    let family: Family = selector.parse()?;
    tracing::debug!(%family, "resolved purchase family");

    let factory = family.factory();
    Ok((
        factory.create_discount_service(),
        factory.create_shipping_costs_service(),
    ))
}

// ============================================================================
// Client
// ============================================================================

pub struct ShoppingCart {
    discount: Box<dyn DiscountService>,
    shipping: Box<dyn ShippingCostsService>,
    order_costs: u64,
}

impl ShoppingCart {
    pub fn new(factory: &dyn PurchaseFactory) -> Self {
        Self {
            discount: factory.create_discount_service(),
            shipping: factory.create_shipping_costs_service(),
            order_costs: DEFAULT_ORDER_COSTS,
        }
    }

    pub fn with_order_costs(mut self, order_costs: u64) -> Self {
        self.order_costs = order_costs;
        self
    }

    pub fn order_costs(&self) -> u64 {
        self.order_costs
    }

    /// Whole-unit arithmetic: the discount is taken per full hundred.
    pub fn total_costs(&self) -> u64 {
        let discount = self.order_costs / 100 * u64::from(self.discount.discount_percentage());
        self.order_costs.saturating_sub(discount) + self.shipping.shipping_costs()
    }

    pub fn calculate_costs(&self, sink: &dyn DisplaySink) {
        sink.write(&format!("Total costs = {}", self.total_costs()));
    }
}

// ============================================================================
// Tests
// ============================================================================

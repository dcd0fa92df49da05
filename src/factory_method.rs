// Pattern 3: Factory Method
// Each factory decides which discount strategy to create; callers only see the trait.

use std::sync::Arc;

use dashmap::DashSet;
use uuid::Uuid;

use crate::config::{DiscountTable, RedemptionPolicy};
use crate::error::{PatternError, Result};

// ============================================================================
// Strategies
// ============================================================================

pub trait DiscountStrategy: Send + Sync {
    fn discount_percentage(&self) -> u32;

    fn name(&self) -> &'static str;

    /// Amount left after the discount, taken per full hundred.
    fn apply(&self, amount: u64) -> u64 {
        let discount = (amount / 100).saturating_mul(u64::from(self.discount_percentage()));
        amount.saturating_sub(discount)
    }
}

/// Percentage already resolved from the lookup table by the factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDiscount {
    country: String,
    percentage: u32,
}

impl CountryDiscount {
    pub fn country(&self) -> &str {
        &self.country
    }
}

impl DiscountStrategy for CountryDiscount {
    fn discount_percentage(&self) -> u32 {
        self.percentage
    }

    fn name(&self) -> &'static str {
        "CountryDiscount"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDiscount {
    code: Uuid,
    percentage: u32,
}

impl CodeDiscount {
    pub fn code(&self) -> Uuid {
        self.code
    }
}

impl DiscountStrategy for CodeDiscount {
    fn discount_percentage(&self) -> u32 {
        self.percentage
    }

    fn name(&self) -> &'static str {
        "CodeDiscount"
    }
}

// ============================================================================
// Consumed-code registry
// ============================================================================

/// Tracks which one-time codes have been redeemed.
#[derive(Debug, Default)]
pub struct CodeRegistry {
    policy: RedemptionPolicy,
    consumed: DashSet<Uuid>,
}

impl CodeRegistry {
    pub fn new(policy: RedemptionPolicy) -> Self {
        Self {
            policy,
            consumed: DashSet::new(),
        }
    }

    pub fn policy(&self) -> RedemptionPolicy {
        self.policy
    }

    /// Marks `code` as used. The set insert is the check, so two racing
    /// redemptions of one code cannot both succeed. `Unenforced` tracks nothing.
    pub fn redeem(&self, code: Uuid) -> Result<()> {
        if self.policy == RedemptionPolicy::Unenforced {
            tracing::debug!(%code, "discount code accepted without tracking");
            return Ok(());
        }

        if !self.consumed.insert(code) {
            tracing::warn!(%code, "discount code already redeemed");
            return Err(PatternError::CodeAlreadyUsed { code });
        }
        tracing::debug!(%code, "discount code redeemed");
        Ok(())
    }

    pub fn is_consumed(&self, code: &Uuid) -> bool {
        self.consumed.contains(code)
    }

    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }
}

// ============================================================================
// Factories
// ============================================================================

pub trait DiscountFactory {
    fn create_discount_strategy(&self) -> Result<Box<dyn DiscountStrategy>>;
}

pub struct CountryDiscountFactory {
    country: String,
    table: Arc<DiscountTable>,
}

impl CountryDiscountFactory {
    /// Uses the built-in table (BE → 20, everything else 10).
    pub fn new(country: impl Into<String>) -> Self {
        Self::with_table(country, Arc::new(DiscountTable::default()))
    }

    pub fn with_table(country: impl Into<String>, table: Arc<DiscountTable>) -> Self {
        Self {
            country: country.into(),
            table,
        }
    }
}

impl DiscountFactory for CountryDiscountFactory {
    fn create_discount_strategy(&self) -> Result<Box<dyn DiscountStrategy>> {
        let percentage = self.table.percentage_for(&self.country);
        tracing::debug!(country = %self.country, percentage, "country discount");
        Ok(Box::new(CountryDiscount {
            country: self.country.clone(),
            percentage,
        }))
    }
}

pub struct CodeDiscountFactory {
    code: Uuid,
    percentage: u32,
    registry: Arc<CodeRegistry>,
}

impl CodeDiscountFactory {
    pub fn new(code: Uuid, percentage: u32, registry: Arc<CodeRegistry>) -> Self {
        Self {
            code,
            percentage,
            registry,
        }
    }

    pub fn code(&self) -> Uuid {
        self.code
    }
}

impl DiscountFactory for CodeDiscountFactory {
    /// Redeems the code; fails if it was already used under `SingleUse`.
    fn create_discount_strategy(&self) -> Result<Box<dyn DiscountStrategy>> {
        self.registry.redeem(self.code)?;
        Ok(Box::new(CodeDiscount {
            code: self.code,
            percentage: self.percentage,
        }))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CODE_PERCENTAGE;
    use proptest::prelude::*;
    use std::thread;

    fn single_use() -> Arc<CodeRegistry> {
        Arc::new(CodeRegistry::new(RedemptionPolicy::SingleUse))
    }

    #[test]
    fn test_country_discount() {
        let be = CountryDiscountFactory::new("BE").create_discount_strategy().unwrap();
        assert_eq!(be.discount_percentage(), 20);
        assert_eq!(be.name(), "CountryDiscount");

        let fr = CountryDiscountFactory::new("FR").create_discount_strategy().unwrap();
        assert_eq!(fr.discount_percentage(), 10);
    }

    #[test]
    fn test_country_discount_uses_supplied_table() {
        let table = Arc::new(DiscountTable::default().with_rate("NL", 12));
        let nl = CountryDiscountFactory::with_table("NL", Arc::clone(&table));
        assert_eq!(nl.create_discount_strategy().unwrap().discount_percentage(), 12);

        let be = CountryDiscountFactory::with_table("BE", table);
        assert_eq!(be.create_discount_strategy().unwrap().discount_percentage(), 20);
    }

    #[test]
    fn test_code_discount() {
        let factory = CodeDiscountFactory::new(Uuid::new_v4(), DEFAULT_CODE_PERCENTAGE, single_use());
        let strategy = factory.create_discount_strategy().unwrap();
        assert_eq!(strategy.discount_percentage(), 15);
        assert_eq!(strategy.name(), "CodeDiscount");
    }

    #[test]
    fn test_apply() {
        let be = CountryDiscountFactory::new("BE").create_discount_strategy().unwrap();
        assert_eq!(be.apply(200), 160);
        assert_eq!(be.apply(250), 210);
        assert_eq!(be.apply(50), 50);
    }

    #[test]
    fn test_apply_does_not_overflow() {
        let table = Arc::new(DiscountTable::default().with_rate("XX", 100));
        let all = CountryDiscountFactory::with_table("XX", table)
            .create_discount_strategy()
            .unwrap();
        assert_eq!(all.apply(200), 0);

        let big = CodeDiscountFactory::new(Uuid::new_v4(), u32::MAX, single_use())
            .create_discount_strategy()
            .unwrap();
        assert_eq!(big.apply(u64::MAX), 0);
    }

    // Single-use redemption is enforced by default.
    #[test]
    fn test_second_redemption_fails_when_single_use() {
        let registry = single_use();
        let code = Uuid::new_v4();
        let factory = CodeDiscountFactory::new(code, 15, Arc::clone(&registry));

        assert!(factory.create_discount_strategy().is_ok());
        let err = factory.create_discount_strategy().err().unwrap();
        assert!(matches!(err, PatternError::CodeAlreadyUsed { code: c } if c == code));

        // A second factory for the same code shares the registry.
        let again = CodeDiscountFactory::new(code, 15, registry);
        assert!(again.create_discount_strategy().is_err());
    }

    // The unenforced policy reproduces the no-tracking behaviour.
    #[test]
    fn test_reuse_allowed_when_unenforced() {
        let registry = Arc::new(CodeRegistry::new(RedemptionPolicy::Unenforced));
        assert_eq!(registry.policy(), RedemptionPolicy::Unenforced);
        let code = Uuid::new_v4();
        let factory = CodeDiscountFactory::new(code, 15, Arc::clone(&registry));

        for _ in 0..3 {
            assert_eq!(factory.create_discount_strategy().unwrap().discount_percentage(), 15);
        }
        assert!(!registry.is_consumed(&code));
        assert_eq!(registry.consumed_count(), 0);
    }

    #[test]
    fn test_distinct_codes_are_independent() {
        let registry = single_use();
        for _ in 0..5 {
            let factory = CodeDiscountFactory::new(Uuid::new_v4(), 15, Arc::clone(&registry));
            assert!(factory.create_discount_strategy().is_ok());
        }
        assert_eq!(registry.consumed_count(), 5);
    }

    #[test]
    fn test_racing_redemptions_succeed_once() {
        let registry = single_use();
        let code = Uuid::new_v4();

        let successes = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let registry = Arc::clone(&registry);
                    s.spawn(move || registry.redeem(code).is_ok())
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|ok| *ok)
                .count()
        });

        assert_eq!(successes, 1);
    }

    #[test]
    fn test_factories_behind_trait_objects() {
        let registry = single_use();
        let factories: Vec<Box<dyn DiscountFactory>> = vec![
            Box::new(CountryDiscountFactory::new("BE")),
            Box::new(CountryDiscountFactory::new("DE")),
            Box::new(CodeDiscountFactory::new(Uuid::new_v4(), 15, registry)),
        ];

        let percentages: Vec<u32> = factories
            .iter()
            .map(|f| f.create_discount_strategy().unwrap().discount_percentage())
            .collect();
        assert_eq!(percentages, vec![20, 10, 15]);
    }

    proptest! {
        #[test]
        fn test_unknown_regions_fall_back(region in "[A-Z]{2,3}") {
            prop_assume!(region != "BE");
            let strategy = CountryDiscountFactory::new(region).create_discount_strategy().unwrap();
            prop_assert_eq!(strategy.discount_percentage(), 10);
        }

        #[test]
        fn test_any_code_gives_fixed_percentage(bits in any::<u128>()) {
            let factory = CodeDiscountFactory::new(Uuid::from_u128(bits), 15, single_use());
            let strategy = factory.create_discount_strategy().unwrap();
            prop_assert_eq!(strategy.discount_percentage(), 15);
        }
    }
}

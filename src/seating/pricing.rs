use super::map::SeatTier;
use crate::config::PricingConfig;

/// Цена места: базовая цена кинотеатра плюс фиксированная доплата за премиум.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingResolver {
    premium_surcharge: i64,
}

impl PricingResolver {
    pub fn new(premium_surcharge: i64) -> Self {
        Self { premium_surcharge }
    }

    pub fn from_config(config: &PricingConfig) -> Self {
        Self::new(config.premium_surcharge)
    }

    pub fn premium_surcharge(&self) -> i64 {
        self.premium_surcharge
    }

    // Базовую цену не проверяем - за неё отвечает каталог кинотеатров.
    pub fn resolve(&self, base_price: i64, tier: SeatTier) -> i64 {
        match tier {
            SeatTier::Standard => base_price,
            SeatTier::Premium => base_price + self.premium_surcharge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_keeps_base_price() {
        let pricing = PricingResolver::new(25_000);
        assert_eq!(pricing.resolve(50_000, SeatTier::Standard), 50_000);
    }

    #[test]
    fn premium_adds_surcharge() {
        let pricing = PricingResolver::new(25_000);
        assert_eq!(pricing.resolve(50_000, SeatTier::Premium), 75_000);
        assert_eq!(pricing.resolve(35_000, SeatTier::Premium), 60_000);
    }

    #[test]
    fn surcharge_comes_from_config() {
        let pricing = PricingResolver::from_config(&PricingConfig { premium_surcharge: 10_000 });
        assert_eq!(pricing.premium_surcharge(), 10_000);
        assert_eq!(pricing.resolve(40_000, SeatTier::Premium), 50_000);
    }
}

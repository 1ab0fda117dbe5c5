use crate::{amount::Amount, errors::BalanceErr};
use rust_decimal::Decimal;

/// Represents current account balance together with the lowest value it may reach
#[derive(Debug, Clone, Default)]
pub struct Balance {
    amount: Decimal,
    // 0 for checking, the savings minimum otherwise
    floor: Decimal,
}

impl Balance {
    /// Balance starting at `amount` clamped up to `floor`
    pub fn new(amount: Decimal, floor: Decimal) -> Self {
        Self {
            amount: amount.max(floor),
            floor,
        }
    }

    pub fn try_deposit(&mut self, amount: &Amount) -> Result<(), BalanceErr> {
        let sum = self.amount.checked_add(**amount);
        self.amount = sum.ok_or(BalanceErr::Overflow)?;
        Ok(())
    }

    pub fn try_withdraw(&mut self, amount: &Amount) -> Result<(), BalanceErr> {
        if self.amount - **amount < self.floor {
            return Err(BalanceErr::NotEnoughAvailableFunds);
        }

        self.amount -= **amount;
        Ok(())
    }

    /// Set the balance, returns `true` when `value` was below the floor and got clamped
    pub fn set_clamped(&mut self, value: Decimal) -> bool {
        if value < self.floor {
            self.amount = self.floor;
            true
        } else {
            self.amount = value;
            false
        }
    }

    /// Multiply balance by `1 + rate`, returns the gained amount.
    ///
    /// On overflow the balance is left unchanged.
    pub fn try_grow(&mut self, rate: Decimal) -> Result<Decimal, BalanceErr> {
        let factor = Decimal::ONE.checked_add(rate);
        let grown = factor.and_then(|f| self.amount.checked_mul(f));
        let grown = grown.ok_or(BalanceErr::Overflow)?;
        debug_assert!(grown >= self.floor);

        let gained = grown - self.amount;
        self.amount = grown;
        Ok(gained)
    }
}

impl Balance {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn floor(&self) -> Decimal {
        self.floor
    }
}

#[cfg(test)]
mod test {
    use super::Balance;
    use crate::{amount::Amount, errors::BalanceErr};
    use rust_decimal::Decimal;

    fn amount(num: i64, scale: u32) -> Amount {
        Decimal::new(num, scale).try_into().unwrap()
    }

    #[test]
    fn new_is_clamped_to_floor() {
        let checking = Balance::new(Decimal::new(-5, 0), Decimal::ZERO);
        assert_eq!(checking.amount(), Decimal::ZERO);

        let savings = Balance::new(Decimal::ZERO, Decimal::new(100, 0));
        assert_eq!(savings.amount(), Decimal::new(100, 0));
    }

    #[test]
    fn withdraw_down_to_floor() {
        let mut b = Balance::new(Decimal::new(150, 0), Decimal::new(100, 0));

        assert_eq!(
            b.try_withdraw(&amount(60, 0)),
            Err(BalanceErr::NotEnoughAvailableFunds)
        );
        assert_eq!(b.amount(), Decimal::new(150, 0));

        b.try_withdraw(&amount(50, 0)).unwrap();
        assert_eq!(b.amount(), Decimal::new(100, 0));
    }

    #[test]
    fn overflowing_deposit_keeps_balance() {
        let mut b = Balance::new(Decimal::MAX, Decimal::ZERO);

        assert_eq!(b.try_deposit(&amount(1, 0)), Err(BalanceErr::Overflow));
        assert_eq!(b.amount(), Decimal::MAX);
    }

    #[test]
    fn overflowing_growth_keeps_balance() {
        let start = Decimal::MAX - Decimal::new(1000, 0);
        let mut b = Balance::new(start, Decimal::new(100, 0));

        assert_eq!(b.try_grow(Decimal::new(2, 2)), Err(BalanceErr::Overflow));
        assert_eq!(b.amount(), start);

        let mut b = Balance::new(Decimal::new(150, 0), Decimal::new(100, 0));
        assert_eq!(b.try_grow(Decimal::new(2, 2)), Ok(Decimal::new(3, 0)));
        assert_eq!(b.amount(), Decimal::new(153, 0));
    }

    #[test]
    fn set_reports_clamping() {
        let mut b = Balance::default();
        assert!(b.set_clamped(Decimal::new(-50, 0)));
        assert_eq!(b.amount(), Decimal::ZERO);
        assert!(!b.set_clamped(Decimal::new(25, 1)));
        assert_eq!(b.amount(), Decimal::new(25, 1));
    }
}

pub trait CheckedCeilDiv: Sized {
    /// 执行向上取整除法
    fn checked_ceil_div(&self, rhs: Self) -> Option<Self>;
}

impl CheckedCeilDiv for u128 {
    fn checked_ceil_div(&self, rhs: Self) -> Option<Self> {
        let mut quotient = self.checked_div(rhs)?;
        let remainder = self.checked_rem(rhs)?;
        if remainder != 0 {
            quotient = quotient.checked_add(1)?;
        }
        Some(quotient)
    }
}

pub trait DownCast {
    fn to_u64(&self) -> Option<u64>;
}

impl DownCast for u128 {
    fn to_u64(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceil_div_rounds_up_only_on_remainder() {
        assert_eq!(10u128.checked_ceil_div(5), Some(2));
        assert_eq!(11u128.checked_ceil_div(5), Some(3));
        assert_eq!(0u128.checked_ceil_div(5), Some(0));
        assert_eq!(1u128.checked_ceil_div(0), None);
    }

    #[test]
    fn down_cast_rejects_wide_values() {
        assert_eq!(42u128.to_u64(), Some(42));
        assert_eq!((u64::MAX as u128).to_u64(), Some(u64::MAX));
        assert_eq!((u64::MAX as u128 + 1).to_u64(), None);
    }
}

//! Uniswap 不变量恒定乘积曲线，供内存交易所报价使用

/// 池子费率分母，费率以百分之bip(10^-6)为单位
pub const POOL_FEE_DENOMINATOR: u64 = 1_000_000;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantProductCurve;

impl ConstantProductCurve {
    /// 不含费用的精确输入交换，输出向下取整（对池子有利）
    pub fn swap_base_input_without_fees(
        input_amount: u128,
        input_vault_amount: u128,
        output_vault_amount: u128,
    ) -> Option<u128> {
        let numerator = input_amount.checked_mul(output_vault_amount)?;
        let denominator = input_vault_amount.checked_add(input_amount)?;
        numerator.checked_div(denominator)
    }

    /// 扣除池子费率后再交换
    pub fn swap_base_input(
        input_amount: u128,
        input_vault_amount: u128,
        output_vault_amount: u128,
        fee_rate: u64,
    ) -> Option<u128> {
        let fee_denominator = u128::from(POOL_FEE_DENOMINATOR);
        let input_less_fee = input_amount
            .checked_mul(fee_denominator.checked_sub(u128::from(fee_rate))?)?
            .checked_div(fee_denominator)?;
        Self::swap_base_input_without_fees(input_less_fee, input_vault_amount, output_vault_amount)
    }
}

use solana_sdk::pubkey::Pubkey;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::interfaces::{Checkpoint, Journal, LedgerError};

/// 注册在链上的流动性池
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolInfo {
    pub token_a: Pubkey,
    pub token_b: Pubkey,
    /// 百分之bip
    pub fee: u32,
}

impl PoolInfo {
    pub fn matches(&self, token_in: &Pubkey, token_out: &Pubkey, fee: u32) -> bool {
        self.fee == fee
            && ((self.token_a == *token_in && self.token_b == *token_out)
                || (self.token_a == *token_out && self.token_b == *token_in))
    }
}

/// 可回滚的全部余额状态
#[derive(Clone, Debug, Default)]
pub struct ChainState {
    pub native: HashMap<Pubkey, u64>,
    /// (asset, owner) -> balance
    pub tokens: HashMap<(Pubkey, Pubkey), u64>,
    /// (asset, owner, spender) -> allowance
    pub allowances: HashMap<(Pubkey, Pubkey, Pubkey), u64>,
    pub pools: HashMap<Pubkey, PoolInfo>,
}

impl ChainState {
    pub fn native_balance(&self, owner: &Pubkey) -> u64 {
        self.native.get(owner).copied().unwrap_or_default()
    }

    pub fn token_balance(&self, asset: &Pubkey, owner: &Pubkey) -> u64 {
        self.tokens.get(&(*asset, *owner)).copied().unwrap_or_default()
    }

    pub fn allowance(&self, asset: &Pubkey, owner: &Pubkey, spender: &Pubkey) -> u64 {
        self.allowances.get(&(*asset, *owner, *spender)).copied().unwrap_or_default()
    }

    pub fn move_native(&mut self, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let available = self.native_balance(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        let credited = self.native_balance(to).checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.native.insert(*from, available - amount);
        self.native.insert(*to, credited);
        Ok(())
    }

    pub fn move_tokens(&mut self, asset: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let available = self.token_balance(asset, from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.tokens.insert((*asset, *from), available - amount);
        let credited = self.token_balance(asset, to).checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.tokens.insert((*asset, *to), credited);
        Ok(())
    }

    pub fn mint_tokens(&mut self, asset: &Pubkey, owner: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let credited = self.token_balance(asset, owner).checked_add(amount).ok_or(LedgerError::Overflow)?;
        self.tokens.insert((*asset, *owner), credited);
        Ok(())
    }

    pub fn burn_tokens(&mut self, asset: &Pubkey, owner: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let available = self.token_balance(asset, owner);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        self.tokens.insert((*asset, *owner), available - amount);
        Ok(())
    }
}

/// 测试用的故障注入，不参与回滚
#[derive(Clone, Debug, Default)]
pub struct Faults {
    /// 设置后交易所拒绝所有交换
    pub swap_failure: Option<String>,
    /// 对这些地址的原生转账返回 false
    pub rejected_payees: HashSet<Pubkey>,
    /// 包装时少记入的数量
    pub wrap_shortfall: u64,
    /// 对这些地址的代币转账返回 Ok(false)
    pub rejected_token_recipients: HashSet<Pubkey>,
}

/// 确定性的内存链，实现外部协作方所需的全部状态和事务边界。
///
/// 一条链只服务一个路由器：回滚恢复的是整条链的快照，检查点按后进先出嵌套。
/// 检查点存续期间由其他调用方写入的状态会随回滚一起丢失。
#[derive(Debug, Default)]
pub struct MemoryChain {
    state: Mutex<ChainState>,
    snapshots: Mutex<Vec<ChainState>>,
    faults: Mutex<Faults>,
}

impl MemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, ChainState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn faults(&self) -> MutexGuard<'_, Faults> {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshots(&self) -> MutexGuard<'_, Vec<ChainState>> {
        self.snapshots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前状态的完整拷贝
    pub fn snapshot(&self) -> ChainState {
        self.state().clone()
    }

    pub fn airdrop_native(&self, owner: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        let mut state = self.state();
        let credited = state.native_balance(owner).checked_add(amount).ok_or(LedgerError::Overflow)?;
        state.native.insert(*owner, credited);
        Ok(())
    }

    pub fn mint_tokens(&self, asset: &Pubkey, owner: &Pubkey, amount: u64) -> Result<(), LedgerError> {
        self.state().mint_tokens(asset, owner, amount)
    }

    pub fn native_balance(&self, owner: &Pubkey) -> u64 {
        self.state().native_balance(owner)
    }

    pub fn token_balance(&self, asset: &Pubkey, owner: &Pubkey) -> u64 {
        self.state().token_balance(asset, owner)
    }

    /// 注册池子并注入初始储备（储备记在池子地址名下）
    pub fn create_pool(
        &self,
        pool: Pubkey,
        info: PoolInfo,
        reserve_a: u64,
        reserve_b: u64,
    ) -> Result<(), LedgerError> {
        let mut state = self.state();
        state.mint_tokens(&info.token_a, &pool, reserve_a)?;
        state.mint_tokens(&info.token_b, &pool, reserve_b)?;
        state.pools.insert(pool, info);
        Ok(())
    }
}

impl Journal for MemoryChain {
    fn begin(&self) -> Checkpoint {
        let copy = self.snapshot();
        let mut snapshots = self.snapshots();
        snapshots.push(copy);
        Checkpoint(snapshots.len() - 1)
    }

    fn commit(&self, checkpoint: Checkpoint) {
        self.snapshots().truncate(checkpoint.0);
    }

    fn rollback(&self, checkpoint: Checkpoint) {
        let mut snapshots = self.snapshots();
        if let Some(saved) = snapshots.get(checkpoint.0).cloned() {
            *self.state() = saved;
        }
        snapshots.truncate(checkpoint.0);
    }
}

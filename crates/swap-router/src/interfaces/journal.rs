/// 事务检查点，由 [`Journal::begin`] 返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(pub usize);

/// 外部状态的事务边界。
///
/// 交易操作在 `begin` 与 `commit` 之间执行；任何一步失败都调用 `rollback`，
/// 检查点之后的所有余额变动整体撤销。
pub trait Journal: Send + Sync {
    fn begin(&self) -> Checkpoint;

    fn commit(&self, checkpoint: Checkpoint);

    fn rollback(&self, checkpoint: Checkpoint);
}

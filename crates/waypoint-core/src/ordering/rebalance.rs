//! Rank rebalancing.

use log::info;

use crate::{
    error::Result,
    models::Item,
    params::DayRef,
    rank::RankAllocator,
    store::{access, UnitOfWork},
};

pub(super) fn rebalance_day<U: UnitOfWork>(
    unit: &mut U,
    allocator: &RankAllocator,
    params: &DayRef,
) -> Result<Vec<Item>> {
    let (day, _) = access::owned_day(unit, params.day_id, params.user_id)?;
    let items = unit.day_items(day.id)?;
    let rebalanced = rewrite_ranks(unit, allocator, &items)?;
    info!("Rebalanced {} items of day {}", rebalanced.len(), day.id);
    Ok(rebalanced)
}

/// Assigns `1..=n` to `items` in their given order. Rows already holding
/// their target rank are not written.
pub(super) fn rewrite_ranks<U: UnitOfWork>(
    unit: &mut U,
    allocator: &RankAllocator,
    items: &[Item],
) -> Result<Vec<Item>> {
    items
        .iter()
        .zip(allocator.rebalanced_ranks(items.len()))
        .map(|(item, rank)| {
            if item.rank != rank {
                unit.set_item_rank(item.id, rank)?;
            }
            Ok(Item {
                rank,
                ..item.clone()
            })
        })
        .collect()
}

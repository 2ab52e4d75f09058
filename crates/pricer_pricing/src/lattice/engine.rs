//! Memoized backward valuation shared by the lattice pricers.
//!
//! The recursion `V(j, s) = disc·(p·V(j+1, s+1) + (1-p)·V(j, s+1))` is
//! driven by an explicit work stack of post-order frames instead of the
//! call stack, so its depth does not grow with the number of steps.

use num_traits::Float;
use pricer_models::instruments::InstrumentTrait;
use tracing::debug;

use super::cache::{NodeCache, NodeIndex};
use super::error::LatticeError;
use super::geometry::LatticeGeometry;

/// Decides whether a node is knocked out, given its index and level.
///
/// Consulted on every visit, before the cache lookup. A knocked-out node is
/// worth zero and is never cached.
pub(crate) trait NodeFilter<T: Float> {
    fn knocked_out(&self, node: NodeIndex, level: T) -> bool;
}

/// Filter that never knocks a node out.
pub(crate) struct NoKnockout;

impl<T: Float> NodeFilter<T> for NoKnockout {
    #[inline]
    fn knocked_out(&self, _node: NodeIndex, _level: T) -> bool {
        false
    }
}

enum Frame {
    /// First visit of a node.
    Enter(NodeIndex),
    /// Both children are valued and sit on top of the value stack.
    Combine(NodeIndex),
}

/// Values the lattice from the root, filling `cache`.
///
/// The cache is expected to be empty on entry.
pub(crate) fn value_lattice<T, I, F>(
    geometry: &LatticeGeometry<T>,
    instrument: &I,
    num_steps: usize,
    filter: &F,
    cache: &mut NodeCache<T>,
) -> Result<T, LatticeError>
where
    T: Float,
    I: InstrumentTrait<T>,
    F: NodeFilter<T>,
{
    let spot = instrument.underlying().spot();
    let early_exercise = instrument.exercise_style().allows_early_exercise();

    let mut work = vec![Frame::Enter(NodeIndex::ROOT)];
    let mut values: Vec<T> = Vec::with_capacity(num_steps + 1);

    while let Some(frame) = work.pop() {
        match frame {
            Frame::Enter(node) => {
                let level = geometry.level_at(spot, node);
                if filter.knocked_out(node, level) {
                    values.push(T::zero());
                } else if let Some(value) = cache.get(node) {
                    values.push(value);
                } else if node.step >= num_steps {
                    let value = instrument.payoff(level);
                    cache.insert(node, value);
                    values.push(value);
                } else {
                    // up child is popped first, so its value lands below the down child's
                    work.push(Frame::Combine(node));
                    work.push(Frame::Enter(node.down()));
                    work.push(Frame::Enter(node.up()));
                }
            }
            Frame::Combine(node) => {
                let (Some(down_value), Some(up_value)) = (values.pop(), values.pop()) else {
                    return Err(incomplete(node));
                };
                let mut value = geometry.rollback(up_value, down_value);
                if early_exercise {
                    value = value.max(instrument.payoff(geometry.level_at(spot, node)));
                }
                cache.insert(node, value);
                values.push(value);
            }
        }
    }

    let root = values.pop().ok_or(incomplete(NodeIndex::ROOT))?;

    debug!(
        instrument = instrument.type_name(),
        num_steps,
        nodes_cached = cache.len(),
        "lattice valued"
    );

    if !root.is_finite() {
        return Err(LatticeError::NonFiniteValue {
            num_up_moves: NodeIndex::ROOT.num_up_moves,
            step: NodeIndex::ROOT.step,
        });
    }
    Ok(root)
}

fn incomplete(node: NodeIndex) -> LatticeError {
    LatticeError::IncompleteValuation {
        num_up_moves: node.num_up_moves,
        step: node.step,
    }
}

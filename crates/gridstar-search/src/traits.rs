use std::hash::Hash;

/// Capabilities the A\* engine needs from a search state.
///
/// Equality and hashing identify *the same state*: two values that compare
/// equal are deduplicated by the engine, so `Eq` and `Hash` must agree and
/// should only look at the state's identity (e.g. a grid location), never at
/// auxiliary data such as a map handle.
pub trait SearchState: Clone + Eq + Hash {
    /// Heuristic estimate of the remaining cost from `self` to `goal`.
    /// Must never overestimate the true cost (admissible).
    fn goal_distance_estimate(&self, goal: &Self) -> f32;

    /// Whether `self` satisfies the goal.
    fn is_goal(&self, goal: &Self) -> bool;

    /// Append the states reachable in one edge from `self` into `out`.
    ///
    /// `parent` is the state this one was reached from, if any. Returns
    /// `false` when successors cannot be produced at all; the engine then
    /// treats the state as a dead end.
    fn successors(&self, parent: Option<&Self>, out: &mut Vec<Self>) -> bool;

    /// Cost of the edge from `self` to the adjacent `successor`. Must be > 0.
    fn cost(&self, successor: &Self) -> f32;
}

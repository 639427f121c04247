use super::player::Player;
use rand::prelude::SliceRandom;
use rand::Rng;

/// Assigns every player a target such that the players form one randomised cycle.
///
/// The roster order is left untouched; only the hunting order is shuffled.
/// A lone player is given no target, since nobody is left to hunt.
pub fn assign_targets(players: &mut [Player], rng: &mut impl Rng) {
    let mut order = (0..players.len()).collect::<Vec<_>>();
    order.shuffle(rng);

    for (pos, &hunter) in order.iter().enumerate() {
        let prey = order[(pos + 1) % order.len()];
        let target = (prey != hunter).then(|| players[prey].name.clone());
        players[hunter].target = target;
    }
}

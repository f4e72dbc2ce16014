// Health-tiered policy
//
// Healthy snakes keep away from enemies, hungry ones look for food while
// dodging contested squares, starving ones go straight for the nearest food.

use log::debug;

use crate::grid::Occupant;
use crate::policy::{DecisionContext, MovePolicy, TieBreaker};
use crate::types::{Coord, Direction};

#[derive(Debug, Clone, Copy)]
pub struct ForagerPolicy {
    /// At or above this health the snake only avoids enemies
    pub avoid_health_threshold: i32,
    /// At or below this health the snake eats regardless of risk
    pub desperate_health_threshold: i32,
}

impl Default for ForagerPolicy {
    fn default() -> Self {
        ForagerPolicy {
            avoid_health_threshold: 50,
            desperate_health_threshold: 15,
        }
    }
}

/// Tier the forager acts in for a given health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appetite {
    Sated,
    Hungry,
    Starving,
}

impl ForagerPolicy {
    pub fn new(avoid_health_threshold: i32, desperate_health_threshold: i32) -> Self {
        ForagerPolicy {
            avoid_health_threshold,
            desperate_health_threshold,
        }
    }

    pub fn appetite(&self, health: i32) -> Appetite {
        if health >= self.avoid_health_threshold {
            Appetite::Sated
        } else if health > self.desperate_health_threshold {
            Appetite::Hungry
        } else {
            Appetite::Starving
        }
    }

    /// Most breathing room among non-colliding moves, else the least bad move
    fn escape(&self, ctx: &DecisionContext) -> Direction {
        ctx.escape_move(&ctx.non_colliding_moves())
            .unwrap_or_else(|| ctx.least_bad_move())
    }

    /// A heading is only kept if it leaves room for our whole body
    fn roomy(&self, ctx: &DecisionContext, heading: Option<Direction>) -> Option<Direction> {
        heading.filter(|dir| !ctx.too_cramped(*dir))
    }

    fn avoid_enemies(&self, ctx: &DecisionContext) -> Direction {
        let heading = ctx
            .nearest_enemy(&ctx.head)
            .and_then(|(enemy, _)| ctx.heading(&enemy.head, true));

        match self.roomy(ctx, heading) {
            Some(dir) => dir,
            None => {
                let dir = self.escape(ctx);
                debug!("No roomy heading away from enemies, escaping {}", dir.as_str());
                dir
            }
        }
    }

    fn seek_food_carefully(&self, ctx: &DecisionContext, tie_breaker: &mut dyn TieBreaker) -> Direction {
        let (food, _) = match ctx.nearest_food(&ctx.head) {
            Some(found) => found,
            None => {
                let safe = ctx.non_colliding_moves();
                let dir = if safe.is_empty() {
                    ctx.least_bad_move()
                } else {
                    tie_breaker.choose(&safe)
                };
                debug!("No food on the board, punting with {}", dir.as_str());
                return dir;
            }
        };

        let dir = match self.roomy(ctx, ctx.heading(&food, false)) {
            Some(dir) => dir,
            None => return self.escape(ctx),
        };

        let next = dir.apply(&ctx.head);
        let contested = match adjacent_enemy(ctx.enemies, &next) {
            Some(enemy) => enemy,
            None => return dir,
        };

        debug!(
            "Enemy head at ({},{}) next to ({},{}), backing off",
            contested.head.x, contested.head.y, next.x, next.y
        );
        match self.roomy(ctx, ctx.heading(&contested.head, true)) {
            Some(dir) => dir,
            None => self.escape(ctx),
        }
    }

    fn seek_food_desperately(&self, ctx: &DecisionContext) -> Direction {
        let food = match ctx.nearest_food(&ctx.head) {
            Some((food, _)) => food,
            None => return self.avoid_enemies(ctx),
        };

        ctx.heading(&food, false)
            .unwrap_or_else(|| self.escape(ctx))
    }
}

/// Closest enemy head within one square of `cell`, diagonals included
fn adjacent_enemy<'a>(enemies: &'a [Occupant], cell: &Coord) -> Option<&'a Occupant> {
    enemies
        .iter()
        .filter(|enemy| (enemy.head.x - cell.x).abs() <= 1 && (enemy.head.y - cell.y).abs() <= 1)
        .min_by_key(|enemy| enemy.head.manhattan(cell))
}

impl MovePolicy for ForagerPolicy {
    fn decide(&self, ctx: &DecisionContext, tie_breaker: &mut dyn TieBreaker) -> Direction {
        let appetite = self.appetite(ctx.health);
        debug!("Health {} -> {:?}", ctx.health, appetite);

        match appetite {
            Appetite::Sated => self.avoid_enemies(ctx),
            Appetite::Hungry => self.seek_food_carefully(ctx, tie_breaker),
            Appetite::Starving => self.seek_food_desperately(ctx),
        }
    }
}

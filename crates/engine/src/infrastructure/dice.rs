//! Standalone die roller backed by a [`RandomPort`].

use std::sync::Arc;

use async_trait::async_trait;
use pr20_domain::DiceFormula;

use crate::infrastructure::ports::{DiceRollError, DieRollerPort, RandomPort};

/// Rolls each die with the injected random source, then applies the
/// formula's keep rule.
pub struct RandomDieRoller {
    random: Arc<dyn RandomPort>,
}

impl RandomDieRoller {
    pub fn new(random: Arc<dyn RandomPort>) -> Self {
        Self { random }
    }
}

#[async_trait]
impl DieRollerPort for RandomDieRoller {
    async fn evaluate(&self, formula: &DiceFormula) -> Result<i32, DiceRollError> {
        let total = formula.evaluate_with(|size| self.random.gen_range(1, i32::from(size)));
        tracing::trace!(formula = %formula, total, "Evaluated dice");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockRandomPort;
    use mockall::predicate::eq;
    use mockall::Sequence;

    #[tokio::test]
    async fn keep_highest_uses_best_die() {
        let mut random = MockRandomPort::new();
        let mut seq = Sequence::new();
        random
            .expect_gen_range()
            .with(eq(1), eq(20))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| 4);
        random
            .expect_gen_range()
            .with(eq(1), eq(20))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| 17);

        let roller = RandomDieRoller::new(Arc::new(random));
        let total = roller
            .evaluate(&DiceFormula::parse("2d20kh1").unwrap())
            .await
            .unwrap();
        assert_eq!(total, 17);
    }

    #[tokio::test]
    async fn single_die_uses_its_size() {
        let mut random = MockRandomPort::new();
        random
            .expect_gen_range()
            .with(eq(1), eq(6))
            .times(1)
            .returning(|_, _| 5);

        let roller = RandomDieRoller::new(Arc::new(random));
        let total = roller.evaluate(&DiceFormula::single(6)).await.unwrap();
        assert_eq!(total, 5);
    }
}

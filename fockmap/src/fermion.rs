use crate::ladder::LadderOperator;
use num_complex::Complex64;
use std::fmt::{self, Display};

/// `coefficient · a_{i₁} a_{i₂} …`, operators applied right to left as written.
#[derive(Debug, Clone, PartialEq)]
pub struct FermionicTerm {
    pub coefficient: Complex64,
    pub operators: Vec<LadderOperator>,
}

impl FermionicTerm {
    #[must_use]
    pub fn new(coefficient: Complex64, operators: Vec<LadderOperator>) -> Self {
        FermionicTerm { coefficient, operators }
    }

    /// Multiple of the identity.
    #[must_use]
    pub fn constant(coefficient: Complex64) -> Self {
        FermionicTerm::new(coefficient, Vec::new())
    }

    #[must_use]
    pub fn adjoint(&self) -> Self {
        FermionicTerm {
            coefficient: self.coefficient.conj(),
            operators: self.operators.iter().rev().map(|operator| operator.adjoint()).collect(),
        }
    }

    /// Largest mode any operator acts on.
    #[must_use]
    pub fn max_mode(&self) -> Option<usize> {
        self.operators.iter().map(|operator| operator.mode).max()
    }
}

impl Display for FermionicTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.coefficient)?;
        for operator in &self.operators {
            write!(f, " {operator}")?;
        }
        Ok(())
    }
}

/// Sum of fermionic terms, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FermionicExpression {
    terms: Vec<FermionicTerm>,
}

impl FermionicExpression {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `a_j† a_j`.
    #[must_use]
    pub fn number_operator(mode: usize) -> Self {
        FermionicExpression::new().with_term(
            Complex64::new(1.0, 0.0),
            vec![LadderOperator::create(mode), LadderOperator::annihilate(mode)],
        )
    }

    /// `coefficient · (a_p† a_q + a_q† a_p)`.
    #[must_use]
    pub fn hopping(p: usize, q: usize, coefficient: f64) -> Self {
        let coefficient = Complex64::new(coefficient, 0.0);
        FermionicExpression::new()
            .with_term(coefficient, vec![LadderOperator::create(p), LadderOperator::annihilate(q)])
            .with_term(coefficient, vec![LadderOperator::create(q), LadderOperator::annihilate(p)])
    }

    #[must_use]
    pub fn with_term(mut self, coefficient: Complex64, operators: Vec<LadderOperator>) -> Self {
        self.push(FermionicTerm::new(coefficient, operators));
        self
    }

    pub fn push(&mut self, term: FermionicTerm) {
        self.terms.push(term);
    }

    #[must_use]
    pub fn terms(&self) -> &[FermionicTerm] {
        &self.terms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of modes needed to hold every operator.
    #[must_use]
    pub fn mode_count(&self) -> usize {
        self.terms
            .iter()
            .filter_map(FermionicTerm::max_mode)
            .max()
            .map_or(0, |mode| mode + 1)
    }

    #[must_use]
    pub fn adjoint(&self) -> Self {
        self.terms.iter().map(FermionicTerm::adjoint).collect()
    }
}

impl FromIterator<FermionicTerm> for FermionicExpression {
    fn from_iter<Iter: IntoIterator<Item = FermionicTerm>>(iter: Iter) -> Self {
        FermionicExpression {
            terms: iter.into_iter().collect(),
        }
    }
}

impl Extend<FermionicTerm> for FermionicExpression {
    fn extend<Iter: IntoIterator<Item = FermionicTerm>>(&mut self, iter: Iter) {
        self.terms.extend(iter);
    }
}

impl Display for FermionicExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for (position, term) in self.terms.iter().enumerate() {
            if position > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjoint_reverses_operators() {
        let term = FermionicTerm::new(
            Complex64::new(1.0, 2.0),
            vec![LadderOperator::create(0), LadderOperator::annihilate(3)],
        );
        let adjoint = term.adjoint();
        assert_eq!(adjoint.coefficient, Complex64::new(1.0, -2.0));
        assert_eq!(adjoint.operators, vec![LadderOperator::create(3), LadderOperator::annihilate(0)]);
        assert_eq!(adjoint.adjoint(), term);
    }

    #[test]
    fn mode_count_covers_every_operator() {
        let expression = FermionicExpression::hopping(1, 4, 0.5).with_term(Complex64::new(2.0, 0.0), Vec::new());
        assert_eq!(expression.mode_count(), 5);
        assert_eq!(expression.len(), 3);
        assert_eq!(FermionicExpression::new().mode_count(), 0);
    }

    #[test]
    fn display() {
        let expression = FermionicExpression::number_operator(2);
        assert_eq!(expression.to_string(), "(1+0i) a₂† a₂");
        assert_eq!(FermionicExpression::new().to_string(), "0");
    }
}

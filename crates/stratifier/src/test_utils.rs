//! Small program builders shared by unit tests.

use ast::{Atom, Clause, Literal, Program, QualifiedName, Relation, RelationId};

pub(crate) fn id(i: usize) -> RelationId {
    RelationId::new(i)
}

pub(crate) fn ids(is: &[usize]) -> Vec<RelationId> {
    is.iter().copied().map(id).collect()
}

pub(crate) fn pos(name: &str) -> Literal {
    Literal::Atom(Atom::new(name, vec![]))
}

pub(crate) fn neg(name: &str) -> Literal {
    Literal::Negation(Atom::new(name, vec![]))
}

pub(crate) fn clause(head: &str, body: &[Literal]) -> Clause {
    Clause::new(Atom::new(head, vec![]), body.to_vec())
}

pub(crate) fn program(relations: &[&str], clauses: Vec<Clause>) -> Program {
    Program::new(
        relations
            .iter()
            .map(|name| Relation::new(*name, vec![]))
            .collect(),
        clauses,
    )
}

pub(crate) fn names_of(names: &[QualifiedName]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

//! Schema commands: index and constraint creation and removal.

use crate::ast::nodes;
use crate::error::Error;
use crate::parser::grammar::{atom, bail, expression, lexical};
use crate::parser::Driver;

use lexical::{keyword, keywords, sym, sym_seq};

pub(super) fn schema_command(p: &mut Driver) -> Result<Option<usize>, Error> {
    if let Some(index) = prop_index(p)? {
        return Ok(Some(index));
    }
    prop_constraint(p)
}

/// `CREATE INDEX ON :Label(prop)` / `DROP INDEX ON :Label(prop)`
fn prop_index(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let create = if keywords(p, &["CREATE", "INDEX"])? {
        true
    } else if keywords(p, &["DROP", "INDEX"])? {
        false
    } else {
        bail!(p, m);
    };

    if !keyword(p, "ON")? {
        bail!(p, m, "ON");
    }
    if !sym(p, b':')? {
        bail!(p, m, "':'");
    }
    let Some(label) = atom::label_node(p)? else { bail!(p, m, "a label") };
    if !sym(p, b'(')? {
        bail!(p, m, "'('");
    }
    let Some(prop) = atom::prop_name_node(p)? else { bail!(p, m, "a property name") };
    if !sym(p, b')')? {
        bail!(p, m, "')'");
    }

    let block = p.block_end();
    let node = if create {
        nodes::create_node_prop_index(label, prop, block)
    } else {
        nodes::drop_node_prop_index(label, prop, block)
    };
    Ok(Some(p.emit(node)?))
}

/// `CREATE|DROP CONSTRAINT ON (id:Label) ASSERT expr [IS UNIQUE]`, or the
/// relationship form `ON ()-[id:TYPE]-()`.
fn prop_constraint(p: &mut Driver) -> Result<Option<usize>, Error> {
    let m = p.mark();
    p.block_start();
    let create = if keywords(p, &["CREATE", "CONSTRAINT"])? {
        true
    } else if keywords(p, &["DROP", "CONSTRAINT"])? {
        false
    } else {
        bail!(p, m);
    };

    if !keyword(p, "ON")? {
        bail!(p, m, "ON");
    }

    // Node form: `(id:Label)`; relationship form starts with `()`.
    let rel_form = p.peek()? == Some(b'(') && {
        let mut i = 1;
        loop {
            match p.peek_at(i)? {
                Some(b' ') | Some(b'\t') => i += 1,
                Some(b')') => break true,
                _ => break false,
            }
        }
    };

    if rel_form {
        if !sym(p, b'(')? || !sym(p, b')')? {
            bail!(p, m, "'('");
        }
        if !sym_seq(p, b"<-")? && !sym(p, b'-')? {
            bail!(p, m, "'-'");
        }
        if !sym(p, b'[')? {
            bail!(p, m, "'['");
        }
        let Some(identifier) = atom::identifier(p)? else { bail!(p, m, "an identifier") };
        if !sym(p, b':')? {
            bail!(p, m, "':'");
        }
        let Some(reltype) = atom::reltype_node(p)? else { bail!(p, m, "a relationship type") };
        if !sym(p, b']')? {
            bail!(p, m, "']'");
        }
        if !sym_seq(p, b"->")? && !sym(p, b'-')? {
            bail!(p, m, "'-'");
        }
        if !sym(p, b'(')? || !sym(p, b')')? {
            bail!(p, m, "'('");
        }

        let Some((expr, unique)) = assertion(p)? else { bail!(p, m) };
        let block = p.block_end();
        let node = if create {
            nodes::create_rel_prop_constraint(identifier, reltype, expr, unique, block)
        } else {
            nodes::drop_rel_prop_constraint(identifier, reltype, expr, unique, block)
        };
        return Ok(Some(p.emit(node)?));
    }

    if !sym(p, b'(')? {
        bail!(p, m, "'('");
    }
    let Some(identifier) = atom::identifier(p)? else { bail!(p, m, "an identifier") };
    if !sym(p, b':')? {
        bail!(p, m, "':'");
    }
    let Some(label) = atom::label_node(p)? else { bail!(p, m, "a label") };
    if !sym(p, b')')? {
        bail!(p, m, "')'");
    }

    let Some((expr, unique)) = assertion(p)? else { bail!(p, m) };
    let block = p.block_end();
    let node = if create {
        nodes::create_node_prop_constraint(identifier, label, expr, unique, block)
    } else {
        nodes::drop_node_prop_constraint(identifier, label, expr, unique, block)
    };
    Ok(Some(p.emit(node)?))
}

/// `ASSERT expr [IS UNIQUE]`
fn assertion(p: &mut Driver) -> Result<Option<(usize, bool)>, Error> {
    if !keyword(p, "ASSERT")? {
        p.expected("ASSERT")?;
        return Ok(None);
    }
    let Some(expr) = expression::expression(p)? else {
        p.expected("an expression")?;
        return Ok(None);
    };
    let unique = keywords(p, &["IS", "UNIQUE"])?;
    Ok(Some((expr, unique)))
}

#[cfg(test)]
mod tests {
    use crate::ast::AstKind;
    use crate::Parser;

    fn body(input: &str) -> crate::ParseResult {
        let result = Parser::new(input).parse().unwrap();
        assert_eq!(result.nerrors(), 0, "unexpected errors in {input:?}");
        result
    }

    #[test]
    fn index_commands_pair_create_and_drop() {
        let result = body("CREATE INDEX ON :Person(name);");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        assert_eq!(statement.body().kind(), AstKind::CreateNodePropIndex);
        assert!(statement.body().instance_of(AstKind::SchemaCommand));

        let result = body("DROP INDEX ON :Person(name);");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        let drop = statement.body().as_drop_node_prop_index().unwrap();
        assert_eq!(drop.label().as_label().unwrap().name(), "Person");
        assert_eq!(drop.prop_name().as_prop_name().unwrap().value(), "name");
    }

    #[test]
    fn node_constraints_carry_the_unique_flag() {
        let result = body("CREATE CONSTRAINT ON (p:Person) ASSERT p.name IS UNIQUE");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        let constraint = statement.body().as_create_node_prop_constraint().unwrap();
        assert!(constraint.is_unique());
        assert_eq!(constraint.identifier().as_identifier().unwrap().name(), "p");
        assert_eq!(constraint.label().as_label().unwrap().name(), "Person");
        assert_eq!(constraint.expression().kind(), AstKind::PropertyOperator);

        let result = body("DROP CONSTRAINT ON (p:Person) ASSERT exists(p.name)");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        let constraint = statement.body().as_drop_node_prop_constraint().unwrap();
        assert!(!constraint.is_unique());
        assert_eq!(constraint.expression().kind(), AstKind::ApplyOperator);
    }

    #[test]
    fn rel_constraints_use_the_relationship_form() {
        let result = body("CREATE CONSTRAINT ON ()-[r:KNOWS]-() ASSERT exists(r.since)");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        let constraint = statement.body().as_create_rel_prop_constraint().unwrap();
        assert_eq!(constraint.identifier().as_identifier().unwrap().name(), "r");
        assert_eq!(constraint.reltype().as_reltype().unwrap().name(), "KNOWS");
        assert!(!constraint.is_unique());

        let result = body("DROP CONSTRAINT ON ()-[r:KNOWS]->() ASSERT exists(r.since)");
        let statement = result.root(0).unwrap().as_statement().unwrap();
        assert_eq!(statement.body().kind(), AstKind::DropRelPropConstraint);
    }
}

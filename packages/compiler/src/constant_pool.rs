//! Constant Pool
//!
//! Collects the statements a compilation hoists out of its definition (shared literals, helper
//! functions) and hands them out as variable references. Identical literals are declared once.

use crate::output::output_ast as o;
use std::collections::HashMap;

const CONSTANT_PREFIX: &str = "_c";
const POOL_INCLUSION_LENGTH_THRESHOLD_FOR_STRINGS: usize = 50;

/// Computes a structural key for expressions that may be shared.
///
/// Returns `None` for anything whose identity cannot be derived from its shape, most notably
/// wrapped host nodes.
pub struct GenericKeyFn;

impl GenericKeyFn {
    pub fn key_of<N>(expr: &o::Expression<N>) -> Option<String> {
        match expr {
            o::Expression::Literal(lit) => Some(match &lit.value {
                o::LiteralValue::String(s) => format!("\"{}\"", s.escape_default()),
                o::LiteralValue::Number(n) => n.to_string(),
                o::LiteralValue::Bool(b) => b.to_string(),
                o::LiteralValue::Null => "null".to_string(),
                o::LiteralValue::Undefined => "undefined".to_string(),
            }),
            o::Expression::LiteralArray(arr) => {
                let entries = arr
                    .entries
                    .iter()
                    .map(Self::key_of)
                    .collect::<Option<Vec<_>>>()?;
                Some(format!("[{}]", entries.join(",")))
            }
            o::Expression::LiteralMap(map) => {
                let entries = map
                    .entries
                    .iter()
                    .map(|entry| {
                        let key = if entry.quoted {
                            format!("\"{}\"", entry.key.escape_default())
                        } else {
                            entry.key.clone()
                        };
                        Self::key_of(&entry.value).map(|value| format!("{}:{}", key, value))
                    })
                    .collect::<Option<Vec<_>>>()?;
                Some(format!("{{{}}}", entries.join(",")))
            }
            o::Expression::External(ext) => Some(format!(
                "import(\"{}\", {})",
                ext.value.module_name.as_deref().unwrap_or(""),
                ext.value.name.as_deref().unwrap_or("")
            )),
            o::Expression::ReadVar(var) => Some(format!("read({})", var.name)),
            o::Expression::ReadProp(prop) => {
                Self::key_of(&prop.receiver).map(|receiver| format!("{}.{}", receiver, prop.name))
            }
            o::Expression::TypeOf(e) => Self::key_of(&e.expr).map(|k| format!("typeof({})", k)),
            o::Expression::NotExpr(e) => Self::key_of(&e.condition).map(|k| format!("!({})", k)),
            _ => None,
        }
    }
}

pub struct ConstantPool<N> {
    pub statements: Vec<o::Statement<N>>,
    literals: HashMap<String, o::Expression<N>>,
    shared_functions: HashMap<String, o::Expression<N>>,
    claimed_names: HashMap<String, u32>,
    next_name_index: u32,
}

impl<N: Clone> ConstantPool<N> {
    pub fn new() -> Self {
        ConstantPool {
            statements: Vec::new(),
            literals: HashMap::new(),
            shared_functions: HashMap::new(),
            claimed_names: HashMap::new(),
            next_name_index: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Hoist `literal` into a `const` and return a reference to it.
    ///
    /// Short primitive literals are returned untouched unless `force_shared` is set. A literal
    /// that was already hoisted resolves to the existing constant.
    pub fn get_const_literal(
        &mut self,
        literal: o::Expression<N>,
        force_shared: bool,
    ) -> o::Expression<N> {
        if !force_shared && is_simple_literal(&literal) {
            return literal;
        }

        let Some(key) = GenericKeyFn::key_of(&literal) else {
            if !force_shared {
                return literal;
            }
            return self.declare_constant(literal);
        };

        if let Some(existing) = self.literals.get(&key) {
            return existing.clone();
        }

        let reference = self.declare_constant(literal);
        self.literals.insert(key, reference.clone());
        reference
    }

    /// Declare `fn_expr` as a named function (or constant, for other expressions) and return a
    /// reference to it. Structurally identical functions are declared once.
    pub fn get_shared_function_reference(
        &mut self,
        fn_expr: o::Expression<N>,
        prefix: &str,
    ) -> o::Expression<N> {
        let key = GenericKeyFn::key_of(&fn_expr);
        if let Some(existing) = key.as_ref().and_then(|k| self.shared_functions.get(k)) {
            return existing.clone();
        }

        let name = self.unique_name(prefix);
        let stmt = match fn_expr {
            o::Expression::Fn(func) => o::Statement::DeclareFn(o::DeclareFunctionStmt {
                name: name.clone(),
                params: func.params,
                statements: func.statements,
                leading_comments: Vec::new(),
                source_span: func.source_span,
            }),
            other => other.to_declare_var(name.clone(), o::StmtModifier::Final),
        };
        self.statements.push(stmt);

        let reference = o::variable(name);
        if let Some(key) = key {
            self.shared_functions.insert(key, reference.clone());
        }
        reference
    }

    /// Produce a name based on `preferred_name` that has not been handed out yet.
    pub fn unique_name(&mut self, preferred_name: &str) -> String {
        match self.claimed_names.get_mut(preferred_name) {
            None => {
                self.claimed_names.insert(preferred_name.to_string(), 0);
                preferred_name.to_string()
            }
            Some(count) => {
                *count += 1;
                let unique = format!("{}_{}", preferred_name, count);
                self.claimed_names.insert(unique.clone(), 0);
                unique
            }
        }
    }

    fn declare_constant(&mut self, value: o::Expression<N>) -> o::Expression<N> {
        let name = self.fresh_name();
        self.statements
            .push(value.to_declare_var(name.clone(), o::StmtModifier::Final));
        o::variable(name)
    }

    fn fresh_name(&mut self) -> String {
        loop {
            let name = format!("{}{}", CONSTANT_PREFIX, self.next_name_index);
            self.next_name_index += 1;
            if !self.claimed_names.contains_key(&name) {
                self.claimed_names.insert(name.clone(), 0);
                return name;
            }
        }
    }
}

impl<N: Clone> Default for ConstantPool<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_simple_literal<N>(expr: &o::Expression<N>) -> bool {
    match expr {
        o::Expression::Literal(lit) => match &lit.value {
            o::LiteralValue::String(s) => s.len() < POOL_INCLUSION_LENGTH_THRESHOLD_FOR_STRINGS,
            _ => true,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selectors(names: &[&str]) -> o::Expression<()> {
        o::literal_arr(names.iter().map(|n| o::literal(*n)).collect())
    }

    #[test]
    fn should_keep_short_primitives_inline() {
        let mut pool: ConstantPool<()> = ConstantPool::new();
        let result = pool.get_const_literal(o::literal("a"), false);
        assert!(matches!(result, o::Expression::Literal(_)));
        assert!(pool.is_empty());
    }

    #[test]
    fn should_share_long_strings() {
        let mut pool: ConstantPool<()> = ConstantPool::new();
        let long = "x".repeat(POOL_INCLUSION_LENGTH_THRESHOLD_FOR_STRINGS);
        let result = pool.get_const_literal(o::literal(long), false);
        assert!(matches!(result, o::Expression::ReadVar(ref v) if v.name == "_c0"));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn should_declare_identical_literals_once() {
        let mut pool: ConstantPool<()> = ConstantPool::new();
        let first = pool.get_const_literal(selectors(&["a", "b"]), false);
        let second = pool.get_const_literal(selectors(&["a", "b"]), false);
        let third = pool.get_const_literal(selectors(&["c"]), false);

        assert_eq!(pool.len(), 2);
        match (first, second, third) {
            (o::Expression::ReadVar(a), o::Expression::ReadVar(b), o::Expression::ReadVar(c)) => {
                assert_eq!(a.name, "_c0");
                assert_eq!(b.name, "_c0");
                assert_eq!(c.name, "_c1");
            }
            other => panic!("expected variable references, got {:?}", other),
        }
    }

    #[test]
    fn should_not_dedupe_literals_containing_wrapped_nodes() {
        let mut pool: ConstantPool<&str> = ConstantPool::new();
        let literal = o::literal_arr(vec![o::wrapped_node("Foo")]);
        let inline = pool.get_const_literal(literal.clone(), false);
        assert!(matches!(inline, o::Expression::LiteralArray(_)));

        pool.get_const_literal(literal.clone(), true);
        pool.get_const_literal(literal, true);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn should_hand_out_unique_names() {
        let mut pool: ConstantPool<()> = ConstantPool::new();
        assert_eq!(pool.unique_name("Cmp_Template"), "Cmp_Template");
        assert_eq!(pool.unique_name("Cmp_Template"), "Cmp_Template_1");
        assert_eq!(pool.unique_name("Cmp_Template"), "Cmp_Template_2");
    }

    #[test]
    fn should_declare_shared_functions_by_name() {
        let mut pool: ConstantPool<()> = ConstantPool::new();
        let func = o::fn_expr(
            vec![o::FnParam::new("rf")],
            vec![o::variable("rf").to_return_stmt()],
            None,
        );
        let reference = pool.get_shared_function_reference(func, "Cmp_Template");
        assert!(matches!(reference, o::Expression::ReadVar(ref v) if v.name == "Cmp_Template"));
        assert!(matches!(
            &pool.statements[0],
            o::Statement::DeclareFn(decl) if decl.name == "Cmp_Template" && decl.params.len() == 1
        ));
    }
}

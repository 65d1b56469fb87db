/// Whether the node being translated sits directly in statement position.
///
/// Assignments only go unparenthesized when they are a whole expression statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub is_statement: bool,
}

impl Context {
    pub fn statement() -> Self {
        Self { is_statement: true }
    }

    pub fn expression() -> Self {
        Self {
            is_statement: false,
        }
    }

    pub fn with_expression_mode(self) -> Self {
        Self::expression()
    }

    pub fn with_statement_mode(self) -> Self {
        Self::statement()
    }
}

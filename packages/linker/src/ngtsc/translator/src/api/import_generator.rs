use crate::ngtsc::translator::src::translator::TranslatorError;

#[derive(Debug, Clone)]
pub struct ImportRequest<TFile> {
    /// Name of the export to be imported.
    /// May be `None` if a namespace import is requested.
    pub export_symbol_name: Option<String>,

    /// Module specifier to be imported.
    pub export_module_specifier: String,

    /// File for which the import is requested for. Generators that never re-use existing
    /// imports, like the linker's, ignore it.
    pub requested_file: TFile,
}

/// Produces the expression through which an imported symbol is referenced.
pub trait ImportGenerator<TFile, TExpression> {
    fn add_import(&mut self, request: ImportRequest<TFile>) -> Result<TExpression, TranslatorError>;
}

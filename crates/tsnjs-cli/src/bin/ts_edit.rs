use tsnjs_analysis::{JavaScriptProvider, Language, TypeScriptProvider};

fn main() {
    let language = Language::from_env("TSNJS_EDIT_LANGUAGE", Language::TypeScript);
    let code = match language {
        Language::JavaScript => tsnjs_cli::run(&JavaScriptProvider, language),
        Language::TypeScript => tsnjs_cli::run(&TypeScriptProvider, language),
    };
    std::process::exit(code);
}

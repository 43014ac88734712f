use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("brevis")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summarize blog posts and articles from the web")
        .arg(clap::arg!(<URL> "URL of the blog post or article"))
        .arg(
            clap::arg!(-l --length <LENGTH> "Summary length (short, medium, long)")
                .default_value("medium")
                .value_parser(["short", "medium", "long"]),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output format (text, json)")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--"extract-only" "Only extract the article text, do not summarize"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds for direct page fetches").default_value("15"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for direct page fetches"))
        .arg(clap::arg!(--model <MODEL> "Text-generation model"))
        .arg(clap::arg!(--"groq-api-key" <KEY> "Groq API key (required unless --extract-only)"))
        .arg(clap::arg!(--"firecrawl-api-key" <KEY> "Firecrawl API key (enables rendering-based extraction)"))
        .arg(clap::arg!(-v --verbose "Enable debug logging"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "brevis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "brevis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "brevis", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "brevis", &completions_dir).unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}

pub fn run() {
    println!("Available commands:");
    println!();
    println!("  -version          Show version information");
    println!("  -help             Show this help message");
    println!("  -search FILE KEYWORD [--case-sensitive] [--whole-word] [--regex] [--json]");
    println!("                    Search a JSON document and print every match");
    println!("  -check-regex PAT  Check whether a regex is valid and meaningful");
    println!("  -show-config      Display current configuration");
    println!("  -validate-config  Validate configuration file");
}

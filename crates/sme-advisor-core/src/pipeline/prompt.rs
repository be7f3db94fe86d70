use super::{reference_library::ReferenceLibrary, Profile};

/// Fixed task instructions. The model must answer with a bare JSON object
/// holding exactly `package`, `tooling_stack` and `justification`.
const TASK_INSTRUCTIONS: &str = "You are an experienced cybersecurity strategist.\n\
Analyze the following SME profile and provide:\n\
1. The most suitable Green Circle managed security package, using the Green Circle security package definitions below.\n\
2. A recommended tooling stack of 3-5 products, chosen from the vendor components list below.\n\
3. A 1-2 line justification summarizing why this package and tooling stack were selected.\n\
Return your output **only in JSON format**, with exactly the keys `package`, `tooling_stack` and `justification`. \
Do not include any text outside this JSON.";

/// Render one profile plus the reference corpora into a single instruction
/// string. Pure and deterministic: identical inputs yield byte-identical
/// prompts, since the profile serializes in struct-field order.
pub fn build_prompt(profile: &Profile, library: &ReferenceLibrary) -> String {
    let profile_json = serde_json::to_string_pretty(profile).unwrap_or_default();
    let vendor_list = bullet_list(&library.vendor_components);
    format!(
        "{TASK_INSTRUCTIONS}\n\n\
         SME Profile:\n{profile_json}\n\n\
         Green Circle Packages:\n{packages}\n\n\
         Available Vendor Components:\n{vendor_list}\n",
        packages = library.package_definitions,
    )
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

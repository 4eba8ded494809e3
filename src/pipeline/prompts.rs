//! Prompt templates for the three kinds of model call

pub use crate::types::document::file_header;

/// Joins the relevant proposal pages for the extraction call
pub const PAGE_SEPARATOR: &str = "\n\n--- PAGE BREAK ---\n\n";

/// Ask for the self-contained sections on one RFP page, as a JSON array.
pub fn section_extraction(page: &str) -> String {
    format!(
        r#"You are analyzing one page of a Request for Proposal (RFP) document.

Identify every self-contained logical section on this page: a requirement, question,
or clause that a vendor would have to answer in a proposal. Copy each section's text
exactly as it appears.

Respond with a JSON array of strings and nothing else. If the page contains no such
sections, respond with an empty array: []

PAGE:
"""
{page}
""""#
    )
}

/// Yes/no: does this proposal page likely answer the requirement?
pub fn relevance_check(section: &str, page: &str) -> String {
    format!(
        r#"RFP REQUIREMENT:
"""
{section}
"""

PROPOSAL PAGE:
"""
{page}
"""

Does this proposal page likely contain the answer to the RFP requirement above?
Answer with a single word: YES or NO."#
    )
}

/// Pull the exact answering passage out of the relevant proposal pages.
pub fn answer_extraction(section: &str, pages: &str) -> String {
    format!(
        r#"RFP REQUIREMENT:
"""
{section}
"""

PROPOSAL EXCERPT:
"""
{pages}
"""

Return only the exact text from the proposal excerpt that answers the RFP requirement.
Do not add commentary, headings, or quotation marks. If nothing in the excerpt answers
the requirement, return an empty response."#
    )
}

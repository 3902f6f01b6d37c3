//! Final prompt assembly for the generation call

/// Assemble the final user-level prompt from the query and retrieved context
///
/// The persona travels separately as the system-level instruction; this
/// function only builds the user message.
#[must_use]
pub fn build_final_prompt(query: &str, context: &str) -> String {
    format!("User Question:\n{query}\n\nDataset Information:\n{context}\n\nAnswer as Pest Bot:")
}

/// Build the fixed analysis instruction for an uploaded crop image
///
/// The image arrives pre-converted to a base64-encoded JPEG; the prompt
/// embeds the encoding as text rather than using multimodal transmission.
#[must_use]
pub fn build_image_prompt(encoded_jpeg: &str) -> String {
    format!(
        "Analyze this crop image (base64 encoded). Provide:\n\
         1. Pest/disease identification\n\
         2. Severity level\n\
         3. Reason for attack\n\
         4. Chemical and organic treatments\n\
         5. Prevention advice\n\n\
         IMAGE_DATA: {encoded_jpeg}"
    )
}

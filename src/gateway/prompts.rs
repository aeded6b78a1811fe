//! Prompt templates for the generative API.
//!
//! Every prompt carries its full context: there is no multi-turn session.

use crate::types::DataSource;

pub fn find_sources(project_description: &str) -> String {
    format!(
        r#"As an expert data science assistant, your task is to find relevant data sources for a project based on the user's description. Use Google Search to find up-to-date and accurate information.

Project Description: "{project_description}"

Based on your search, provide a list of the top 3-5 most relevant data sources. For each source, provide a name, a concise one-sentence description, and the primary access method (e.g., 'Public API', 'Website Download', 'FTP Server').

IMPORTANT: Format your response as a valid JSON array of objects. Do not include any text, code block markers, or explanations before or after the JSON array. Each object in the array must have the keys: "name", "description", and "accessMethod".

Example Response:
[
  {{
    "name": "Solar Dynamics Observatory (SDO)",
    "description": "Provides high-resolution images and data of the Sun from NASA's SDO mission.",
    "accessMethod": "Public API (SunPy), Website Download"
  }},
  {{
    "name": "GOES Solar Ultraviolet Imager (SUVI)",
    "description": "Data from NOAA's Geostationary Operational Environmental Satellite (GOES) series focusing on the Sun's atmosphere.",
    "accessMethod": "Website Download, Data Archives"
  }}
]"#
    )
}

pub fn generate_code(source: &DataSource, project_description: &str, language: &str) -> String {
    format!(
        r#"Write a complete, runnable {language} code snippet to download or access data from the source named "{name}".

Project Context: The data is needed for a project to "{project_description}".
Data Source Description: "{description}".
Access Method: "{access_method}".

The code should be well-commented, include necessary imports, and handle basic error checking if possible. Output only the code itself, with no surrounding text, explanations, or markdown code block markers like ```{fence_tag}```."#,
        name = source.name,
        description = source.description,
        access_method = source.access_method,
        fence_tag = language.to_lowercase(),
    )
}

pub fn get_details(source: &DataSource) -> String {
    format!(
        r#"As a data science expert, provide detailed information about the following data source using Google Search:

Source Name: "{name}"
Description: "{description}"

Find the following details:
1.  dataFormats: An array of common data formats available (e.g., ["CSV", "JSON", "NetCDF"]).
2.  updateFrequency: How often the data is updated (e.g., "Real-time", "Daily", "Monthly").
3.  usageRestrictions: A brief description of usage restrictions (e.g., "API key required", "Public domain").
4.  documentationUrl: A direct URL to the primary documentation page. Omit if not found.

IMPORTANT: Format your response as a single, valid JSON object. Do not include any text or explanations. The object must have the keys: "dataFormats", "updateFrequency", "usageRestrictions", and optionally "documentationUrl".

Example Response:
{{
  "dataFormats": ["netCDF", "FITS", "JPEG2000"],
  "updateFrequency": "Near real-time",
  "usageRestrictions": "Data is public, citation required.",
  "documentationUrl": "https://sdo.gsfc.nasa.gov/data/rules.php"
}}"#,
        name = source.name,
        description = source.description,
    )
}

pub fn answer_follow_up(source: &DataSource, question: &str) -> String {
    format!(
        r#"As a data science expert, answer a follow-up question about a specific data source. Use Google Search to find the answer.

Data Source: "{name}" ({description})
User's Question: "{question}"

Provide a concise and direct answer to the user's question. Format the response as a single JSON object with one key, "answer".

Example Response:
{{
  "answer": "Yes, the SDO mission provides historical data going back to its launch in 2010. You can access it via the Joint Science Operations Center (JSOC) portal."
}}"#,
        name = source.name,
        description = source.description,
    )
}

pub fn generate_scraping_code(url: &str, data_description: &str, language: &str) -> String {
    format!(
        r#"Write a complete, runnable {language} web scraping script that extracts data from the page at "{url}".

Data to extract: "{data_description}".

Use well-known libraries for fetching and parsing HTML, send a sensible User-Agent header, handle HTTP and parsing errors, and save the extracted records to a CSV file. The code should be well-commented and include necessary imports. Output only the code itself, with no surrounding text, explanations, or markdown code block markers like ```{fence_tag}```."#,
        fence_tag = language.to_lowercase(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> DataSource {
        DataSource {
            name: "GOES SUVI".into(),
            description: "Solar ultraviolet imagery".into(),
            access_method: "Website Download".into(),
        }
    }

    #[test]
    fn test_find_sources_embeds_description_and_keys() {
        let p = find_sources("solar flare prediction");
        assert!(p.contains(r#"Project Description: "solar flare prediction""#));
        assert!(p.contains(r#""accessMethod""#));
        assert!(p.contains("Google Search"));
    }

    #[test]
    fn test_generate_code_names_language_and_forbids_fences() {
        let p = generate_code(&source(), "solar flare prediction", "JavaScript");
        assert!(p.contains("runnable JavaScript code snippet"));
        assert!(p.contains(r#"source named "GOES SUVI""#));
        assert!(p.contains("```javascript```"));
    }

    #[test]
    fn test_follow_up_embeds_literal_question() {
        let p = answer_follow_up(&source(), "Is there data before 2017?");
        assert!(p.contains(r#"User's Question: "Is there data before 2017?""#));
        assert!(p.contains(r#"Data Source: "GOES SUVI" (Solar ultraviolet imagery)"#));
    }

    #[test]
    fn test_details_marks_documentation_optional() {
        let p = get_details(&source());
        assert!(p.contains("optionally \"documentationUrl\""));
    }

    #[test]
    fn test_scraping_prompt_embeds_url() {
        let p = generate_scraping_code("https://example.com/t", "the table", "Python");
        assert!(p.contains(r#"page at "https://example.com/t""#));
        assert!(p.contains("```python```"));
    }
}

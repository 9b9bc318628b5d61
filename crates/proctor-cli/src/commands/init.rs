//! The `proctor init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create proctor.toml
    if std::path::Path::new("proctor.toml").exists() {
        println!("proctor.toml already exists, skipping.");
    } else {
        std::fs::write("proctor.toml", SAMPLE_CONFIG)?;
        println!("Created proctor.toml");
    }

    // Create example question bank
    std::fs::create_dir_all("question-banks")?;
    let example_path = std::path::Path::new("question-banks/example.toml");
    if example_path.exists() {
        println!("question-banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created question-banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit proctor.toml with your recruiting address and API key");
    println!("  2. Run: proctor validate --bank question-banks/example.toml");
    println!("  3. Run: proctor run --bank question-banks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# proctor configuration

recipient = "recruiting@example.com"
sender = "onboarding@resend.dev"
bank = "question-banks/example.toml"
state_dir = ".proctor"
output_dir = "./proctor-results"

[delivery]
type = "resend"
api_key = "${PROCTOR_RESEND_KEY}"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "design-basics"
name = "Graphic Design Assessment"
description = "Core graphic design knowledge for candidate screening"

# --- easy -----------------------------------------------------------------

[[questions]]
id = "gd-e01"
prompt = "Which color model is used for professional print work?"
options = ["RGB", "CMYK", "HSL", "HEX"]
correct_option = 1
difficulty = "easy"
group = 1

[[questions]]
id = "gd-e02"
prompt = "What does font weight control?"
options = ["The slant of the letters", "The thickness of the strokes", "The space between lines", "The width of the column"]
correct_option = 1
difficulty = "easy"
group = 1

[[questions]]
id = "gd-e03"
prompt = "Which file format supports transparent backgrounds?"
options = ["JPEG", "PNG", "BMP", "PPM"]
correct_option = 1
difficulty = "easy"
group = 1

[[questions]]
id = "gd-e04"
prompt = "What is a serif?"
options = ["A small stroke at the end of a letter", "A bold display typeface", "A unit of type size", "A page margin"]
correct_option = 0
difficulty = "easy"
group = 2

[[questions]]
id = "gd-e05"
prompt = "What does DPI stand for?"
options = ["Digital print index", "Dots per inch", "Design pixel intensity", "Depth per image"]
correct_option = 1
difficulty = "easy"
group = 2

[[questions]]
id = "gd-e06"
prompt = "What are the primary colors of light?"
options = ["Red, yellow, blue", "Cyan, magenta, yellow", "Red, green, blue", "Orange, green, violet"]
correct_option = 2
difficulty = "easy"
group = 2

[[questions]]
id = "gd-e07"
prompt = "What is kerning?"
options = ["The spacing between a pair of letters", "The height of capital letters", "The alignment of paragraphs", "The contrast of a typeface"]
correct_option = 0
difficulty = "easy"
group = 3

[[questions]]
id = "gd-e08"
prompt = "Which format stores images as vectors?"
options = ["GIF", "SVG", "JPEG", "WEBP"]
correct_option = 1
difficulty = "easy"
group = 3

[[questions]]
id = "gd-e09"
prompt = "What is a mood board used for?"
options = ["Tracking project deadlines", "Collecting visual references for a direction", "Exporting final artwork", "Testing screen resolutions"]
correct_option = 1
difficulty = "easy"
group = 3

[[questions]]
id = "gd-e10"
prompt = "What is white space in a layout?"
options = ["Areas intentionally left empty", "The background color white", "Unprintable margins", "A missing image placeholder"]
correct_option = 0
difficulty = "easy"
group = 4

# --- medium ---------------------------------------------------------------

[[questions]]
id = "gd-m01"
prompt = "What is the approximate value of the golden ratio?"
options = ["1.414", "1.618", "1.732", "2.000"]
correct_option = 1
difficulty = "medium"
group = 1

[[questions]]
id = "gd-m02"
prompt = "Which color is complementary to blue?"
options = ["Green", "Red", "Orange", "Purple"]
correct_option = 2
difficulty = "medium"
group = 2

[[questions]]
id = "gd-m03"
prompt = "What is the x-height of a typeface?"
options = ["The height of the capital X", "The height of lowercase letters without ascenders", "The distance between baselines", "The depth of descenders"]
correct_option = 1
difficulty = "medium"
group = 2

[[questions]]
id = "gd-m04"
prompt = "Why do vector graphics scale better than raster graphics?"
options = ["They use higher resolutions", "They are described by geometry rather than pixels", "They compress more efficiently", "They embed multiple image sizes"]
correct_option = 1
difficulty = "medium"
group = 3

[[questions]]
id = "gd-m05"
prompt = "What does the rule of thirds guide?"
options = ["Choosing three brand colors", "Placing focal points in a composition", "Limiting a layout to three fonts", "Splitting text into three columns"]
correct_option = 1
difficulty = "medium"
group = 4

# --- hard -----------------------------------------------------------------

[[questions]]
id = "gd-h01"
prompt = "What does the gamut of a color space describe?"
options = ["Its default gamma curve", "The range of colors it can represent", "Its bit depth per channel", "The brightness of its white point"]
correct_option = 1
difficulty = "hard"
group = 1

[[questions]]
id = "gd-h02"
prompt = "What defines the shape of a Bezier curve?"
options = ["Its stroke width", "A set of control points", "The canvas resolution", "The number of segments"]
correct_option = 1
difficulty = "hard"
group = 2

[[questions]]
id = "gd-h03"
prompt = "How does optical kerning differ from metric kerning?"
options = ["It uses the font's built-in kerning tables", "It adjusts spacing based on glyph shapes", "It only applies to uppercase pairs", "It disables ligatures"]
correct_option = 1
difficulty = "hard"
group = 3

[[questions]]
id = "gd-h04"
prompt = "In typesetting, what is a widow?"
options = ["A line stranded at the top of a page or column", "A heading without body text", "An oversized initial letter", "A font without an italic style"]
correct_option = 0
difficulty = "hard"
group = 4

[[questions]]
id = "gd-h05"
prompt = "Why is text converted to outlines before sending artwork to some printers?"
options = ["To reduce the file size", "To avoid missing-font substitutions", "To enable color management", "To increase the resolution"]
correct_option = 1
difficulty = "hard"
group = 4
"#;

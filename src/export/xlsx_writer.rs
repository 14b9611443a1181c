//! OOXML container writer.
//!
//! Assembles a complete single-sheet XLSX file: content types, relationships,
//! workbook part, a `styles.xml` generated from the style catalog, and the
//! worksheet itself. Cell text goes out as inline strings, so no shared
//! string table is needed.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::styles::{BorderWeight, Borders, CellStyleSpec, FontSpec, StyleCatalog, StyleTag};

use super::workbook::{CellContent, CellStyleId, Workbook};

/// Cell format order in `styles.xml`; index in this list + 1 is the xf index
/// (xf 0 is the mandatory default format).
const TAG_ORDER: &[StyleTag] = &[
    StyleTag::Title,
    StyleTag::Header,
    StyleTag::Bottom,
    StyleTag::SerialNumber,
    StyleTag::Date,
    StyleTag::Decimal,
    StyleTag::Default,
];

/// First numFmtId available for custom formats (0-163 are reserved).
const FIRST_CUSTOM_NUMFMT: u32 = 164;

/// Serialize the workbook into XLSX container bytes.
pub(crate) fn write_container(workbook: &Workbook, catalog: &StyleCatalog) -> Result<Vec<u8>> {
    let buf = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(buf);
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELS_XML.as_bytes())?;

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(workbook_xml(&workbook.sheet_name).as_bytes())?;

    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    zip.write_all(WORKBOOK_RELS_XML.as_bytes())?;

    zip.start_file("xl/styles.xml", options)?;
    zip.write_all(styles_xml(catalog).as_bytes())?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(sheet_xml(workbook).as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\n",
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#
        ),
        xml_escape(&sanitize_sheet_name(sheet_name))
    )
}

/// Excel sheet names are capped at 31 characters and reject a few characters.
fn sanitize_sheet_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            other => other,
        })
        .take(31)
        .collect()
}

/// xf index of a cell style slot.
fn xf_index(style: CellStyleId) -> usize {
    match style {
        CellStyleId::Tag(tag) => TAG_ORDER.iter().position(|t| *t == tag).map_or(0, |p| p + 1),
        CellStyleId::FooterUnderline => TAG_ORDER.len() + 1,
    }
}

/// Generate `styles.xml` from the catalog.
///
/// Fonts, borders, and custom number formats are interned in first-use order;
/// cell formats follow [`TAG_ORDER`], with the footer underline format last.
fn styles_xml(catalog: &StyleCatalog) -> String {
    let mut fonts: Vec<FontSpec> = vec![catalog.content_font.clone()];
    let mut borders: Vec<Borders> = vec![Borders::none()];
    let mut numfmts: Vec<&'static str> = Vec::new();

    let intern_font = |list: &mut Vec<FontSpec>, font: &FontSpec| -> usize {
        list.iter().position(|f| f == font).unwrap_or_else(|| {
            list.push(font.clone());
            list.len() - 1
        })
    };
    let intern_border = |list: &mut Vec<Borders>, b: Borders| -> usize {
        list.iter().position(|x| *x == b).unwrap_or_else(|| {
            list.push(b);
            list.len() - 1
        })
    };

    struct Xf {
        font: usize,
        border: usize,
        numfmt: u32,
        align: Option<&'static str>,
    }

    let mut xfs: Vec<Xf> = Vec::with_capacity(TAG_ORDER.len() + 1);
    for &tag in TAG_ORDER {
        let spec: CellStyleSpec = catalog.spec_for(tag, None);
        let numfmt = spec.number_format.map_or(0, |pattern| match pattern {
            "0.00" => 2, // builtin
            custom => {
                let pos = numfmts.iter().position(|p| *p == custom).unwrap_or_else(|| {
                    numfmts.push(custom);
                    numfmts.len() - 1
                });
                FIRST_CUSTOM_NUMFMT + u32::try_from(pos).unwrap_or(0)
            }
        });
        xfs.push(Xf {
            font: intern_font(&mut fonts, &spec.font),
            border: intern_border(&mut borders, spec.borders),
            numfmt,
            align: spec.align_h.ooxml_name(),
        });
    }
    // Footer underline: default font, bottom thin border only.
    xfs.push(Xf {
        font: 0,
        border: intern_border(&mut borders, Borders::bottom_only(BorderWeight::Thin)),
        numfmt: 0,
        align: None,
    });

    let mut out = String::with_capacity(4096);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    if !numfmts.is_empty() {
        out.push_str(&format!("<numFmts count=\"{}\">", numfmts.len()));
        for (i, pattern) in numfmts.iter().enumerate() {
            out.push_str(&format!(
                "<numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                FIRST_CUSTOM_NUMFMT + u32::try_from(i).unwrap_or(0),
                xml_escape(pattern)
            ));
        }
        out.push_str("</numFmts>");
    }

    out.push_str(&format!("<fonts count=\"{}\">", fonts.len()));
    for font in &fonts {
        out.push_str("<font>");
        if font.bold {
            out.push_str("<b/>");
        }
        if font.italic {
            out.push_str("<i/>");
        }
        if font.underline {
            out.push_str("<u/>");
        }
        if font.strikeout {
            out.push_str("<strike/>");
        }
        out.push_str(&format!("<sz val=\"{}\"/>", font.size_pt));
        out.push_str(&format!("<name val=\"{}\"/>", xml_escape(&font.name)));
        out.push_str("</font>");
    }
    out.push_str("</fonts>");

    // Fill 0 (none) and 1 (gray125) are required by the spec.
    out.push_str(concat!(
        "<fills count=\"2\">",
        "<fill><patternFill patternType=\"none\"/></fill>",
        "<fill><patternFill patternType=\"gray125\"/></fill>",
        "</fills>"
    ));

    out.push_str(&format!("<borders count=\"{}\">", borders.len()));
    for b in &borders {
        out.push_str("<border>");
        for (edge, weight) in [
            ("left", b.left),
            ("right", b.right),
            ("top", b.top),
            ("bottom", b.bottom),
        ] {
            match weight.ooxml_name() {
                Some(style) => out.push_str(&format!("<{edge} style=\"{style}\"/>")),
                None => out.push_str(&format!("<{edge}/>")),
            }
        }
        out.push_str("<diagonal/></border>");
    }
    out.push_str("</borders>");

    out.push_str(concat!(
        "<cellStyleXfs count=\"1\">",
        "<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/>",
        "</cellStyleXfs>"
    ));

    out.push_str(&format!("<cellXfs count=\"{}\">", xfs.len() + 1));
    out.push_str("<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>");
    for xf in &xfs {
        out.push_str(&format!(
            "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"0\" borderId=\"{}\" xfId=\"0\" \
             applyFont=\"1\" applyBorder=\"1\" applyAlignment=\"1\"{}>",
            xf.numfmt,
            xf.font,
            xf.border,
            if xf.numfmt != 0 {
                " applyNumberFormat=\"1\""
            } else {
                ""
            }
        ));
        match xf.align {
            Some(h) => out.push_str(&format!(
                "<alignment horizontal=\"{h}\" vertical=\"center\" wrapText=\"1\"/>"
            )),
            None => out.push_str("<alignment vertical=\"center\" wrapText=\"1\"/>"),
        }
        out.push_str("</xf>");
    }
    out.push_str("</cellXfs>");

    out.push_str(concat!(
        "<cellStyles count=\"1\">",
        "<cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/>",
        "</cellStyles>"
    ));
    out.push_str("</styleSheet>");
    out
}

/// Generate the worksheet XML.
fn sheet_xml(workbook: &Workbook) -> String {
    let mut out = String::with_capacity(4096);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    out.push('\n');
    out.push_str(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
    );
    out.push_str(
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );
    out.push('\n');

    out.push_str("<sheetFormatPr defaultRowHeight=\"15\"/>\n");

    if !workbook.col_widths.is_empty() {
        out.push_str("<cols>\n");
        for (col, width) in workbook.col_widths.iter().enumerate() {
            let col1 = col + 1; // XLSX is 1-based
            out.push_str(&format!(
                "<col min=\"{col1}\" max=\"{col1}\" width=\"{width:.4}\" customWidth=\"1\"/>\n"
            ));
        }
        out.push_str("</cols>\n");
    }

    out.push_str("<sheetData>\n");
    for (row_idx, row) in workbook.rows.iter().enumerate() {
        out.push_str(&format!(
            "<row r=\"{}\" ht=\"{:.2}\" customHeight=\"1\">",
            row_idx + 1,
            row.height_pt
        ));
        for cell in &row.cells {
            write_cell(&mut out, row_idx, cell.col, &cell.content, xf_index(cell.style));
        }
        out.push_str("</row>\n");
    }
    out.push_str("</sheetData>\n");

    if let Some(merge) = workbook.merge {
        out.push_str(&format!(
            "<mergeCells count=\"1\"><mergeCell ref=\"{}{}:{}{}\"/></mergeCells>\n",
            col_to_letter(merge.col_start),
            merge.row + 1,
            col_to_letter(merge.col_end),
            merge.row + 1
        ));
    }

    out.push_str("</worksheet>");
    out
}

/// Write a single `<c>` element.
fn write_cell(out: &mut String, row: usize, col: usize, content: &CellContent, style: usize) {
    let cell_ref = format!("{}{}", col_to_letter(col), row + 1);
    match content {
        CellContent::Inline(text) => {
            out.push_str(&format!(
                "<c r=\"{cell_ref}\" s=\"{style}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                xml_escape(text)
            ));
        }
        CellContent::Number(n) => {
            out.push_str(&format!("<c r=\"{cell_ref}\" s=\"{style}\"><v>{n}</v></c>"));
        }
        CellContent::Bool(b) => {
            let v = if *b { "1" } else { "0" };
            out.push_str(&format!(
                "<c r=\"{cell_ref}\" s=\"{style}\" t=\"b\"><v>{v}</v></c>"
            ));
        }
        CellContent::Blank => {
            out.push_str(&format!("<c r=\"{cell_ref}\" s=\"{style}\"/>"));
        }
    }
}

/// Convert a 0-based column index to its letter form (0 -> A, 26 -> AA).
fn col_to_letter(col: usize) -> String {
    let mut out = String::new();
    let mut n = col;
    loop {
        let rem = n % 26;
        #[allow(clippy::cast_possible_truncation)]
        out.insert(0, (b'A' + rem as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out
}

/// Minimal XML escaping for attribute/text content.
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

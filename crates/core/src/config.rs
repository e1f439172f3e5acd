use serde::Deserialize;

use crate::error::MergeError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MergeConfig {
    #[serde(default)]
    pub name: String,
    pub reference: ReferenceConfig,
    pub target: TargetConfig,
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Reference sheet (stock counts)
// ---------------------------------------------------------------------------

/// Where to find the barcode and stock-count columns in the reference
/// sheet. Defaults match the warehouse count export: two header rows,
/// barcode in H, counted stock in K.
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceConfig {
    pub file: String,
    #[serde(default)]
    pub sheet: Option<String>,
    /// 1-based row where data begins.
    #[serde(default = "default_reference_start_row")]
    pub data_start_row: u32,
    #[serde(default = "default_reference_key_column")]
    pub key_column: ColumnRef,
    #[serde(default = "default_reference_value_column")]
    pub value_column: ColumnRef,
}

fn default_reference_start_row() -> u32 {
    3
}

fn default_reference_key_column() -> ColumnRef {
    ColumnRef::Letter("H".to_string())
}

fn default_reference_value_column() -> ColumnRef {
    ColumnRef::Letter("K".to_string())
}

// ---------------------------------------------------------------------------
// Target sheet (product catalog)
// ---------------------------------------------------------------------------

/// Layout of the catalog sheet. Defaults match the store-platform
/// export: one header row, product code in B, name in C, barcode in R.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    pub file: String,
    #[serde(default)]
    pub sheet: Option<String>,
    /// 1-based row where data begins.
    #[serde(default = "default_target_start_row")]
    pub data_start_row: u32,
    #[serde(default = "default_target_key_column")]
    pub key_column: ColumnRef,
    #[serde(default = "default_target_code_column")]
    pub code_column: ColumnRef,
    #[serde(default = "default_target_name_column")]
    pub name_column: ColumnRef,
}

fn default_target_start_row() -> u32 {
    2
}

fn default_target_key_column() -> ColumnRef {
    ColumnRef::Letter("R".to_string())
}

fn default_target_code_column() -> ColumnRef {
    ColumnRef::Letter("B".to_string())
}

fn default_target_name_column() -> ColumnRef {
    ColumnRef::Letter("C".to_string())
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub file: String,
    #[serde(default = "default_output_sheet")]
    pub sheet: String,
    /// Header labels for the merged sheet, written as row 1.
    #[serde(default = "default_headers")]
    pub headers: Vec<String>,
}

fn default_output_sheet() -> String {
    "Merged".to_string()
}

/// Column labels of the store-platform upload template. The catalog
/// export carries 25 columns; the appended initial-stock column makes 26.
pub fn default_headers() -> Vec<String> {
    [
        "No.",
        "상품코드",
        "상품명",
        "분류명",
        "거래처",
        "주문상품여부",
        "과면세여부",
        "공급단가",
        "판매상품여부",
        "과세구분여부",
        "판매단가",
        "판매과세여부",
        "재고여부",
        "주문관리여부",
        "할인율",
        "최소주문수량",
        "외부상품코드",
        "바코드",
        "사용여부",
        "진열여부",
        "자녀",
        "출력",
        "매칭키워드사용",
        "주문관리여부2",
        "비고",
        "초기재고",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

// ---------------------------------------------------------------------------
// Column references
// ---------------------------------------------------------------------------

/// A column position as written in a config file: a spreadsheet letter
/// ("H", "AA") or a 1-based number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Index(u32),
    Letter(String),
}

impl ColumnRef {
    /// Resolve to a 0-based column index. `field` names the config key
    /// for error messages.
    pub fn resolve(&self, field: &str) -> Result<usize, MergeError> {
        match self {
            ColumnRef::Index(n) => {
                if *n == 0 {
                    return Err(MergeError::ColumnRef {
                        field: field.to_string(),
                        value: "0".to_string(),
                    });
                }
                Ok(*n as usize - 1)
            }
            ColumnRef::Letter(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(MergeError::ColumnRef {
                        field: field.to_string(),
                        value: s.clone(),
                    });
                }
                let mut col: usize = 0;
                for c in trimmed.to_uppercase().chars() {
                    col = col * 26 + (c as usize - 'A' as usize + 1);
                }
                Ok(col - 1)
            }
        }
    }
}

/// Resolved 0-based positions for the reference sheet.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceColumns {
    pub key: usize,
    pub value: usize,
}

/// Resolved 0-based positions for the target sheet.
#[derive(Debug, Clone, Copy)]
pub struct TargetColumns {
    pub key: usize,
    pub code: usize,
    pub name: usize,
}

impl ReferenceConfig {
    pub fn columns(&self) -> Result<ReferenceColumns, MergeError> {
        Ok(ReferenceColumns {
            key: self.key_column.resolve("reference.key_column")?,
            value: self.value_column.resolve("reference.value_column")?,
        })
    }

    /// Leading rows to skip before data begins.
    pub fn skip_rows(&self) -> usize {
        self.data_start_row.saturating_sub(1) as usize
    }
}

impl TargetConfig {
    pub fn columns(&self) -> Result<TargetColumns, MergeError> {
        Ok(TargetColumns {
            key: self.key_column.resolve("target.key_column")?,
            code: self.code_column.resolve("target.code_column")?,
            name: self.name_column.resolve("target.name_column")?,
        })
    }

    /// Leading rows to skip before data begins.
    pub fn skip_rows(&self) -> usize {
        self.data_start_row.saturating_sub(1) as usize
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MergeConfig {
    pub fn from_toml(input: &str) -> Result<Self, MergeError> {
        let config: MergeConfig =
            toml::from_str(input).map_err(|e| MergeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MergeError> {
        if self.reference.file.trim().is_empty() {
            return Err(MergeError::ConfigValidation(
                "reference.file must not be empty".into(),
            ));
        }
        if self.target.file.trim().is_empty() {
            return Err(MergeError::ConfigValidation(
                "target.file must not be empty".into(),
            ));
        }
        if self.output.file.trim().is_empty() {
            return Err(MergeError::ConfigValidation(
                "output.file must not be empty".into(),
            ));
        }

        if self.reference.data_start_row == 0 {
            return Err(MergeError::ConfigValidation(
                "reference.data_start_row must be >= 1".into(),
            ));
        }
        if self.target.data_start_row == 0 {
            return Err(MergeError::ConfigValidation(
                "target.data_start_row must be >= 1".into(),
            ));
        }

        if self.output.headers.is_empty() {
            return Err(MergeError::ConfigValidation(
                "output.headers must not be empty".into(),
            ));
        }

        // Column references must resolve
        self.reference.columns()?;
        self.target.columns()?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

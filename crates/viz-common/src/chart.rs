use anyhow::Result;
use serde::Serialize;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A Plotly figure, serialized exactly as `Plotly.newPlot()` expects it.
///
/// ```json
/// {
///     "data": [
///         { "type": "scatter", "mode": "lines", "name": "Apple", "x": ["2010-01-04"], "y": [7.64] }
///     ],
///     "layout": { "title": { "text": "Apple Stock Data" } }
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
    Bar,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<BarMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Title {
    pub text: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Axis {
    pub title: Title,
}

/// Unset leaves Plotly's default, side-by-side bars.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Stack,
}

/// A figure ready to be dropped into a page: the `id` of the `<div>` to draw
/// into, and the figure as JSON.
#[derive(Serialize, Debug, Clone)]
pub struct ChartFragment {
    pub id: String,
    pub json: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl Trace {
    /// A line series, e.g., one stock's close prices over time.
    pub fn line(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Trace {
            kind: TraceKind::Scatter,
            mode: Some("lines"),
            name: name.into(),
            x,
            y,
        }
    }

    pub fn bar(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Trace {
            kind: TraceKind::Bar,
            mode: None,
            name: name.into(),
            x,
            y,
        }
    }
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Figure {
            data: vec![],
            layout: Layout {
                title: Title { text: title.into() },
                ..Default::default()
            },
        }
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.data.push(trace);
        self
    }

    pub fn with_barmode(mut self, mode: BarMode) -> Self {
        self.layout.barmode = Some(mode);
        self
    }

    pub fn with_axis_titles(mut self, x: &str, y: &str) -> Self {
        self.layout.xaxis = Some(Axis {
            title: Title { text: x.to_string() },
        });
        self.layout.yaxis = Some(Axis {
            title: Title { text: y.to_string() },
        });
        self
    }

    /// Serialize for inlining inside a `<script>` element; `</` is escaped so a
    /// company or product name can never close the script early.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(json.replace("</", "<\\/"))
    }

    pub fn fragment(&self, id: &str) -> Result<ChartFragment> {
        Ok(ChartFragment {
            id: id.to_string(),
            json: self.to_json()?,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

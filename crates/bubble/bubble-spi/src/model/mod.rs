//! Result and input models.

mod criteria;
mod curve;
mod diagnosis;
mod fitted_params;
mod minimization;
mod price_series;
mod window_result;

pub use criteria::{BubbleCriteria, BubbleIndicators};
pub use curve::PriceCurve;
pub use diagnosis::{BubbleDiagnosis, BubbleState, FitQuality};
pub use fitted_params::FittedParams;
pub use minimization::Minimization;
pub use price_series::{PricePoint, PriceSeries};
pub use window_result::{MultiWindowResult, WindowRange, WindowResult, WindowStatistics};

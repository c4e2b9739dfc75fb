// Domain models: wire payloads per tier and dashboard views

mod dashboard;
mod high;
mod low;
mod medium;
pub mod numeric;
mod submission;
mod tier;

pub use dashboard::{
    BatteryPoint, CpuLoadPoint, DashboardData, DeviceInfo, DisplaySnapshot, LatestReading,
    MemoryPoint, NetworkTotals, ReadingSummary, ThermalPoint, TimeWindow,
};
pub use high::{
    BatteryData, CoolingDeviceData, CpuData, CpuFrequencyData, CpuLoadData, CpuTimeData,
    HighTierData, MemoryData, NetworkData, NetworkInterfaceData, NetworkSummaryData, PowerData,
    ThermalData, ThermalSummaryData, ThermalZoneData, TypeCPortData, UsbInputData, UsbPdData,
};
pub use low::{DisplayData, LedData, LowTierData, RfkillData, SensorsData, WakeupData};
pub use medium::{
    CpuFrequencyStatData, CpuIdleStatData, CpuStatsData, GpuData, MediumTierData, ProcessData,
    ProcessSummaryData, ProcessesData, StorageData, StorageDeviceData, StorageSummaryData,
};
pub use submission::{Acknowledgment, BatchAcknowledgment, RawBatch, RawSubmission, Submission};
pub use tier::{Tier, TierData, UnknownTier};

//! Device property identifiers and their value layouts.

use btmesh_access::{PropertyTable, SchemaError};
use strum::{EnumIter, FromRepr, IntoStaticStr};

use crate::characteristics::*;

/// Mesh device property identifier.
///
/// The `snake_case` variant name is the field a dispatched value is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u16)]
pub enum PropertyId {
    AverageAmbientTemperatureInAPeriodOfDay = 0x0001,
    AverageInputCurrent = 0x0002,
    AverageInputVoltage = 0x0003,
    AverageOutputCurrent = 0x0004,
    AverageOutputVoltage = 0x0005,
    CenterBeamIntensityAtFullPower = 0x0006,
    ChromaticityTolerance = 0x0007,
    ColorRenderingIndexR9 = 0x0008,
    ColorRenderingIndexRa = 0x0009,
    DeviceAppearance = 0x000a,
    DeviceCountryOfOrigin = 0x000b,
    DeviceDateOfManufacture = 0x000c,
    DeviceEnergyUseSinceTurnOn = 0x000d,
    DeviceFirmwareRevision = 0x000e,
    DeviceGlobalTradeItemNumber = 0x000f,
    DeviceHardwareRevision = 0x0010,
    DeviceManufacturerName = 0x0011,
    DeviceModelNumber = 0x0012,
    DeviceOperatingTemperatureRangeSpecification = 0x0013,
    DeviceOperatingTemperatureStatisticalValues = 0x0014,
    DeviceOverTemperatureEventStatistics = 0x0015,
    DevicePowerRangeSpecification = 0x0016,
    DeviceRuntimeSinceTurnOn = 0x0017,
    DeviceRuntimeWarranty = 0x0018,
    DeviceSerialNumber = 0x0019,
    DeviceSoftwareRevision = 0x001a,
    DeviceUnderTemperatureEventStatistics = 0x001b,
    IndoorAmbientTemperatureStatisticalValues = 0x001c,
    InitialCie1931ChromaticityCoordinates = 0x001d,
    InitialCorrelatedColorTemperature = 0x001e,
    InitialLuminousFlux = 0x001f,
    InitialPlanckianDistance = 0x0020,
    InputCurrentRangeSpecification = 0x0021,
    InputCurrentStatistics = 0x0022,
    InputOverCurrentEventStatistics = 0x0023,
    InputOverRippleVoltageEventStatistics = 0x0024,
    InputOverVoltageEventStatistics = 0x0025,
    InputUnderCurrentEventStatistics = 0x0026,
    InputUnderVoltageEventStatistics = 0x0027,
    InputVoltageRangeSpecification = 0x0028,
    InputVoltageRippleSpecification = 0x0029,
    InputVoltageStatistics = 0x002a,
    LightControlAmbientLuxlevelOn = 0x002b,
    LightControlAmbientLuxlevelProlong = 0x002c,
    LightControlAmbientLuxlevelStandby = 0x002d,
    LightControlLightnessOn = 0x002e,
    LightControlLightnessProlong = 0x002f,
    LightControlLightnessStandby = 0x0030,
    LightControlRegulatorAccuracy = 0x0031,
    LightControlRegulatorKid = 0x0032,
    LightControlRegulatorKiu = 0x0033,
    LightControlRegulatorKpd = 0x0034,
    LightControlRegulatorKpu = 0x0035,
    LightControlTimeFade = 0x0036,
    LightControlTimeFadeOn = 0x0037,
    LightControlTimeFadeStandbyAuto = 0x0038,
    LightControlTimeFadeStandbyManual = 0x0039,
    LightControlTimeOccupancyDelay = 0x003a,
    LightControlTimeProlong = 0x003b,
    LightControlTimeRunOn = 0x003c,
    LumenMaintenanceFactor = 0x003d,
    LuminousEfficacy = 0x003e,
    LuminousEnergySinceTurnOn = 0x003f,
    LuminousExposure = 0x0040,
    LuminousFluxRange = 0x0041,
    MotionSensed = 0x0042,
    MotionThreshold = 0x0043,
    OpenCircuitEventStatistics = 0x0044,
    OutdoorStatisticalValues = 0x0045,
    OutputCurrentRange = 0x0046,
    OutputCurrentStatistics = 0x0047,
    OutputRippleVoltageSpecification = 0x0048,
    OutputVoltageRange = 0x0049,
    OutputVoltageStatistics = 0x004a,
    OverOutputRippleVoltageEventStatistics = 0x004b,
    PeopleCount = 0x004c,
    PresenceDetected = 0x004d,
    PresentAmbientLightLevel = 0x004e,
    PresentAmbientTemperature = 0x004f,
    PresentCie1931ChromaticityCoordinates = 0x0050,
    PresentCorrelatedColorTemperature = 0x0051,
    PresentDeviceInputPower = 0x0052,
    PresentDeviceOperatingEfficiency = 0x0053,
    PresentDeviceOperatingTemperature = 0x0054,
    PresentIlluminance = 0x0055,
    PresentIndoorAmbientTemperature = 0x0056,
    PresentInputCurrent = 0x0057,
    PresentInputRippleVoltage = 0x0058,
    PresentInputVoltage = 0x0059,
    PresentLuminousFlux = 0x005a,
    PresentOutdoorAmbientTemperature = 0x005b,
    PresentOutputCurrent = 0x005c,
    PresentOutputVoltage = 0x005d,
    PresentPlanckianDistance = 0x005e,
    PresentRelativeOutputRippleVoltage = 0x005f,
    RelativeDeviceEnergyUseInAPeriodOfDay = 0x0060,
    RelativeDeviceRuntimeInAGenericLevelRange = 0x0061,
    RelativeExposureTimeInAnIlluminanceRange = 0x0062,
    RelativeRuntimeInACorrelatedColorTemperatureRange = 0x0063,
    RelativeRuntimeInADeviceOperatingTemperatureRange = 0x0064,
    RelativeRuntimeInAnInputCurrentRange = 0x0065,
    RelativeRuntimeInAnInputVoltageRange = 0x0066,
    ShortCircuitEventStatistics = 0x0067,
    TimeSinceMotionSensed = 0x0068,
    TimeSincePresenceDetected = 0x0069,
    TotalDeviceEnergyUse = 0x006a,
    TotalDeviceOffOnCycles = 0x006b,
    TotalDevicePowerOnCycles = 0x006c,
    TotalDevicePowerOnTime = 0x006d,
    TotalDeviceRuntime = 0x006e,
    TotalLightExposureTime = 0x006f,
    TotalLuminousEnergy = 0x0070,
    PreciseTotalDeviceEnergyUse = 0x0072,
    PowerFactor = 0x0073,
    ActiveEnergyLoadSide = 0x0080,
    ActivePowerLoadSide = 0x0081,
    ApparentPower = 0x0084,
    ApparentEnergy = 0x0083,
    ExternalSupplyVoltage = 0x0088,
    ExternalSupplyVoltageFrequency = 0x0089,
    LightDistribution = 0x008c,
    LightSourceCurrent = 0x008d,
    LightSourceOnTimeNotResettable = 0x008e,
    LightSourceOnTimeResettable = 0x008f,
    LightSourceOpenCircuitStatistics = 0x0090,
    LightSourceOverallFailuresStatistics = 0x0091,
    LightSourceShortCircuitStatistics = 0x0092,
    LightSourceStartCounterResettable = 0x0093,
    LightSourceTemperature = 0x0094,
    LightSourceThermalDeratingStatistics = 0x0095,
    LightSourceThermalShutdownStatistics = 0x0096,
    LightSourceTotalPowerOnCycles = 0x0097,
    LightSourceVoltage = 0x0098,
    LuminaireColor = 0x0099,
    LuminaireIdentificationNumber = 0x009a,
    LuminaireManufacturerGtin = 0x009b,
    LuminaireNominalInputPower = 0x009c,
    LuminaireNominalMaximumAcMainsVoltage = 0x009d,
    LuminaireNominalMinimumAcMainsVoltage = 0x009e,
    LuminairePowerAtMinimumDimLevel = 0x009f,
    LuminaireTimeOfManufacture = 0x00a0,
    NominalLightOutput = 0x00a4,
    OverallFailureCondition = 0x00a5,
    RatedMedianUsefulLifeOfLuminaire = 0x00ab,
    RatedMedianUsefulLightSourceStarts = 0x00ac,
    ReferenceTemperature = 0x00ad,
    TotalDeviceStarts = 0x00ae,
    LuminaireIdentificationString = 0x00b4,
    OutputPowerLimitation = 0x00b5,
    ThermalDerating = 0x00b6,
    OutputCurrentPercent = 0x00b7,
    LightSourceType = 0x00b3,
    SensorGain = 0x0074,
    PrecisePresentAmbientTemperature = 0x0075,
    DesiredAmbientTemperature = 0x0071,
}

btmesh_access::mesh_enum!(PropertyId, u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum PropertyAccess {
    ReadOnly = 0x01,
    WriteOnly = 0x02,
    ReadWrite = 0x03,
}

btmesh_access::mesh_enum!(PropertyAccess, u8);

/// Registry of every device property with a known layout.
pub fn property_table() -> Result<PropertyTable<PropertyId>, SchemaError> {
    PropertyTable::from_entries([
        (PropertyId::AverageAmbientTemperatureInAPeriodOfDay, temperature_8_in_a_period_of_day()),
        (PropertyId::AverageInputCurrent, average_current()),
        (PropertyId::AverageInputVoltage, average_voltage()),
        (PropertyId::AverageOutputCurrent, average_current()),
        (PropertyId::AverageOutputVoltage, average_voltage()),
        (PropertyId::CenterBeamIntensityAtFullPower, luminous_intensity()),
        (PropertyId::ChromaticityTolerance, chromaticity_tolerance()),
        (PropertyId::ColorRenderingIndexR9, color_rendering_index()),
        (PropertyId::ColorRenderingIndexRa, color_rendering_index()),
        (PropertyId::DeviceAppearance, appearance()?),
        (PropertyId::DeviceCountryOfOrigin, country_code()),
        (PropertyId::DeviceDateOfManufacture, date_utc()),
        (PropertyId::DeviceEnergyUseSinceTurnOn, energy()),
        (PropertyId::DeviceFirmwareRevision, fixed_string(8)),
        (PropertyId::DeviceGlobalTradeItemNumber, global_trade_item_number()),
        (PropertyId::DeviceHardwareRevision, fixed_string(16)),
        (PropertyId::DeviceManufacturerName, fixed_string(36)),
        (PropertyId::DeviceModelNumber, fixed_string(24)),
        (PropertyId::DeviceOperatingTemperatureRangeSpecification, temperature_range()),
        (PropertyId::DeviceOperatingTemperatureStatisticalValues, temperature_statistics()),
        (PropertyId::DeviceOverTemperatureEventStatistics, event_statistics()),
        (PropertyId::DevicePowerRangeSpecification, power_specification()),
        (PropertyId::DeviceRuntimeSinceTurnOn, time_hour_24()),
        (PropertyId::DeviceRuntimeWarranty, time_hour_24()),
        (PropertyId::DeviceSerialNumber, fixed_string(16)),
        (PropertyId::DeviceSoftwareRevision, fixed_string(8)),
        (PropertyId::DeviceUnderTemperatureEventStatistics, event_statistics()),
        (PropertyId::IndoorAmbientTemperatureStatisticalValues, temperature_8_statistics()),
        (PropertyId::InitialCie1931ChromaticityCoordinates, chromaticity_coordinates()),
        (PropertyId::InitialCorrelatedColorTemperature, correlated_color_temperature()),
        (PropertyId::InitialLuminousFlux, luminous_flux()),
        (PropertyId::InitialPlanckianDistance, chromatic_distance_from_planckian()),
        (PropertyId::InputCurrentRangeSpecification, electric_current_specification()),
        (PropertyId::InputCurrentStatistics, electric_current_statistics()),
        (PropertyId::InputOverCurrentEventStatistics, event_statistics()),
        (PropertyId::InputOverRippleVoltageEventStatistics, event_statistics()),
        (PropertyId::InputOverVoltageEventStatistics, event_statistics()),
        (PropertyId::InputUnderCurrentEventStatistics, event_statistics()),
        (PropertyId::InputUnderVoltageEventStatistics, event_statistics()),
        (PropertyId::InputVoltageRangeSpecification, voltage_range()),
        (PropertyId::InputVoltageRippleSpecification, percentage_8()),
        (PropertyId::InputVoltageStatistics, voltage_statistics()),
        (PropertyId::LightControlAmbientLuxlevelOn, illuminance()),
        (PropertyId::LightControlAmbientLuxlevelProlong, illuminance()),
        (PropertyId::LightControlAmbientLuxlevelStandby, illuminance()),
        (PropertyId::LightControlLightnessOn, perceived_lightness()),
        (PropertyId::LightControlLightnessProlong, perceived_lightness()),
        (PropertyId::LightControlLightnessStandby, perceived_lightness()),
        (PropertyId::LightControlRegulatorAccuracy, percentage_8()),
        (PropertyId::LightControlRegulatorKid, coefficient()),
        (PropertyId::LightControlRegulatorKiu, coefficient()),
        (PropertyId::LightControlRegulatorKpd, coefficient()),
        (PropertyId::LightControlRegulatorKpu, coefficient()),
        (PropertyId::LightControlTimeFade, time_millisecond_24()),
        (PropertyId::LightControlTimeFadeOn, time_millisecond_24()),
        (PropertyId::LightControlTimeFadeStandbyAuto, time_millisecond_24()),
        (PropertyId::LightControlTimeFadeStandbyManual, time_millisecond_24()),
        (PropertyId::LightControlTimeOccupancyDelay, time_millisecond_24()),
        (PropertyId::LightControlTimeProlong, time_millisecond_24()),
        (PropertyId::LightControlTimeRunOn, time_millisecond_24()),
        (PropertyId::LumenMaintenanceFactor, percentage_8()),
        (PropertyId::LuminousEfficacy, luminous_efficacy()),
        (PropertyId::LuminousEnergySinceTurnOn, luminous_energy()),
        (PropertyId::LuminousExposure, luminous_exposure()),
        (PropertyId::LuminousFluxRange, luminous_flux_range()),
        (PropertyId::MotionSensed, percentage_8()),
        (PropertyId::MotionThreshold, percentage_8()),
        (PropertyId::OpenCircuitEventStatistics, event_statistics()),
        (PropertyId::OutdoorStatisticalValues, temperature_8_statistics()),
        (PropertyId::OutputCurrentRange, electric_current_range()),
        (PropertyId::OutputCurrentStatistics, electric_current_statistics()),
        (PropertyId::OutputRippleVoltageSpecification, percentage_8()),
        (PropertyId::OutputVoltageRange, voltage_range()),
        (PropertyId::OutputVoltageStatistics, voltage_statistics()),
        (PropertyId::OverOutputRippleVoltageEventStatistics, event_statistics()),
        (PropertyId::PeopleCount, count_16()),
        (PropertyId::PresenceDetected, presence()),
        (PropertyId::PresentAmbientLightLevel, illuminance()),
        (PropertyId::PresentAmbientTemperature, temperature_8_value()),
        (PropertyId::PresentCie1931ChromaticityCoordinates, chromaticity_coordinates()),
        (PropertyId::PresentCorrelatedColorTemperature, correlated_color_temperature()),
        (PropertyId::PresentDeviceInputPower, power_value()),
        (PropertyId::PresentDeviceOperatingEfficiency, percentage_8()),
        (PropertyId::PresentDeviceOperatingTemperature, temperature()),
        (PropertyId::PresentIlluminance, illuminance()),
        (PropertyId::PresentIndoorAmbientTemperature, temperature_8_value()),
        (PropertyId::PresentInputCurrent, electric_current()),
        (PropertyId::PresentInputRippleVoltage, percentage_8()),
        (PropertyId::PresentInputVoltage, voltage_value()),
        (PropertyId::PresentLuminousFlux, luminous_flux()),
        (PropertyId::PresentOutdoorAmbientTemperature, temperature_8_value()),
        (PropertyId::PresentOutputCurrent, electric_current()),
        (PropertyId::PresentOutputVoltage, voltage_value()),
        (PropertyId::PresentPlanckianDistance, chromatic_distance_from_planckian()),
        (PropertyId::PresentRelativeOutputRippleVoltage, percentage_8()),
        (PropertyId::RelativeDeviceEnergyUseInAPeriodOfDay, energy_in_a_period_of_day()),
        (PropertyId::RelativeDeviceRuntimeInAGenericLevelRange, relative_runtime_in_a_generic_level_range()),
        (PropertyId::RelativeExposureTimeInAnIlluminanceRange, relative_value_in_an_illuminance_range()),
        (PropertyId::RelativeRuntimeInACorrelatedColorTemperatureRange, luminous_energy()),
        (PropertyId::RelativeRuntimeInADeviceOperatingTemperatureRange, relative_value_in_a_temperature_range()),
        (PropertyId::RelativeRuntimeInAnInputCurrentRange, relative_value_in_a_current_range()),
        (PropertyId::RelativeRuntimeInAnInputVoltageRange, relative_value_in_a_voltage_range()),
        (PropertyId::ShortCircuitEventStatistics, event_statistics()),
        (PropertyId::TimeSinceMotionSensed, time_second_16()),
        (PropertyId::TimeSincePresenceDetected, time_second_16()),
        (PropertyId::TotalDeviceEnergyUse, energy()),
        (PropertyId::TotalDeviceOffOnCycles, count_24()),
        (PropertyId::TotalDevicePowerOnCycles, count_24()),
        (PropertyId::TotalDevicePowerOnTime, time_hour_24()),
        (PropertyId::TotalDeviceRuntime, time_hour_24()),
        (PropertyId::TotalLightExposureTime, time_hour_24()),
        (PropertyId::TotalLuminousEnergy, luminous_energy()),
        (PropertyId::PreciseTotalDeviceEnergyUse, energy_32()),
        (PropertyId::PowerFactor, cosine_of_the_angle()),
        (PropertyId::ExternalSupplyVoltage, high_voltage()),
        (PropertyId::ExternalSupplyVoltageFrequency, voltage_frequency()),
        (PropertyId::LightDistribution, light_distribution()),
        (PropertyId::LightSourceCurrent, average_current()),
        (PropertyId::LightSourceOnTimeNotResettable, time_second_32()),
        (PropertyId::LightSourceOnTimeResettable, time_second_32()),
        (PropertyId::LightSourceOpenCircuitStatistics, event_statistics()),
        (PropertyId::LightSourceOverallFailuresStatistics, event_statistics()),
        (PropertyId::LightSourceShortCircuitStatistics, event_statistics()),
        (PropertyId::LightSourceStartCounterResettable, count_24()),
        (PropertyId::LightSourceTemperature, high_temperature()),
        (PropertyId::LightSourceThermalDeratingStatistics, event_statistics()),
        (PropertyId::LightSourceThermalShutdownStatistics, event_statistics()),
        (PropertyId::LightSourceTotalPowerOnCycles, count_24()),
        (PropertyId::LightSourceVoltage, average_voltage()),
        (PropertyId::LuminaireColor, fixed_string(24)),
        (PropertyId::LuminaireIdentificationNumber, fixed_string(24)),
        (PropertyId::LuminaireNominalInputPower, power_value()),
        (PropertyId::LuminaireNominalMaximumAcMainsVoltage, voltage_value()),
        (PropertyId::LuminaireNominalMinimumAcMainsVoltage, voltage_value()),
        (PropertyId::LuminairePowerAtMinimumDimLevel, power_value()),
        (PropertyId::LuminaireTimeOfManufacture, date_utc()),
        (PropertyId::NominalLightOutput, light_output()),
        (PropertyId::OverallFailureCondition, event_statistics()),
        (PropertyId::RatedMedianUsefulLifeOfLuminaire, time_hour_24()),
        (PropertyId::RatedMedianUsefulLightSourceStarts, count_24()),
        (PropertyId::ReferenceTemperature, high_temperature()),
        (PropertyId::TotalDeviceStarts, count_24()),
        (PropertyId::LuminaireIdentificationString, fixed_string(64)),
        (PropertyId::OutputPowerLimitation, event_statistics()),
        (PropertyId::ThermalDerating, event_statistics()),
        (PropertyId::OutputCurrentPercent, percentage_8()),
        (PropertyId::LuminaireManufacturerGtin, global_trade_item_number()),
        (PropertyId::ApparentEnergy, energy_32()),
        (PropertyId::ApparentPower, power_value()),
        (PropertyId::ActiveEnergyLoadSide, energy_32()),
        (PropertyId::ActivePowerLoadSide, power_value()),
        (PropertyId::LightSourceType, light_source_type()),
        (PropertyId::DesiredAmbientTemperature, temperature_8_value()),
        (PropertyId::SensorGain, coefficient()),
        (PropertyId::PrecisePresentAmbientTemperature, temperature()),
    ])
}

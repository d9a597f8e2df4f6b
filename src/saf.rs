//! Device fault codes (`eSAFErrorCode`, API r17.1).
//!
//! This namespace is separate from the API call status ([`crate::r17::Status`]):
//! it only appears as the `Ret` field of `Error`, `Warning` and `Fault`
//! messages, and in `Fault::fault_error_code`.

use std::fmt;

macro_rules! saf_codes {
    ($( $variant:ident = $value:literal, $name:literal; )+) => {
        /// A device-internal fault code reported by SAF5x00 firmware.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[repr(i16)]
        pub enum SafErrorCode {
            Success = 0,
            $( $variant = $value, )+
        }

        impl SafErrorCode {
            /// Map a raw `Ret` value to a fault code, `None` if undefined.
            pub fn from_raw(raw: i16) -> Option<Self> {
                match raw {
                    0 => Some(Self::Success),
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Firmware identifier, e.g. `SAF_ERROR_EEPROM_READ_FAILED`.
            pub fn name(self) -> &'static str {
                match self {
                    Self::Success => "SAF_SUCCESS",
                    $( Self::$variant => $name, )+
                }
            }
        }
    };
}

saf_codes! {
    InvalidMkxifType = -10000, "SAF_ERROR_INVALID_MKXIF_TYPE";
    HostUploadMsgCorrupted = -10001, "SAF_ERROR_HOST_UPLOAD_MSG_CORRUPTED";
    DspUnknown = -10002, "SAF_ERROR_DSP_UNKNOWN";
    DspFaultTest = -10003, "SAF_ERROR_DSP_FAULT_TEST";
    ArmFaultTest = -10004, "SAF_ERROR_ARM_FAULT_TEST";
    RadiobUnsupported = -10005, "SAF_ERROR_RADIOB_UNSUPPORTED";
    DspTestfaultFailed = -10006, "SAF_ERROR_DSP_TESTFAULT_FAILED";
    ArmTestfaultFailed = -10007, "SAF_ERROR_ARM_TESTFAULT_FAILED";
    DspException = -10008, "SAF_ERROR_DSP_EXCEPTION";
    RadioconfigTimeout = -10009, "SAF_ERROR_RADIOCONFIG_TIMEOUT";
    OtpFailure = -10010, "SAF_ERROR_OTP_FAILURE";
    TxqueueIndexOutOfBounds = -10100, "SAF_ERROR_TXQUEUE_INDEX_OUT_OF_BOUNDS";
    TxqueueNullQed = -10101, "SAF_ERROR_TXQUEUE_NULL_QED";
    TxqueueNullQueueptr = -10102, "SAF_ERROR_TXQUEUE_NULL_QUEUEPTR";
    TxqueueNullTxpkt = -10103, "SAF_ERROR_TXQUEUE_NULL_TXPKT";
    TxqueueFlushWatchdog = -10104, "SAF_ERROR_TXQUEUE_FLUSH_WATCHDOG";
    TxqueueInactiveQueuenumFailfex = -10105, "SAF_ERROR_TXQUEUE_INACTIVE_QUEUENUM_FAILFEX";
    TxUplDmaWrptrLockup = -10200, "SAF_ERROR_TX_UPL_DMA_WRPTR_LOCKUP";
    InvalidArmCmd = -10300, "SAF_ERROR_INVALID_ARM_CMD";
    InvalidDspCmd = -10301, "SAF_ERROR_INVALID_DSP_CMD";
    EepromNotPresent = -10400, "SAF_ERROR_EEPROM_NOT_PRESENT";
    EepromNotProgrammed = -10401, "SAF_ERROR_EEPROM_NOT_PROGRAMMED";
    EepromSleepTimeout = -10402, "SAF_ERROR_EEPROM_SLEEP_TIMEOUT";
    EepromReadTimeout = -10403, "SAF_ERROR_EEPROM_READ_TIMEOUT";
    EepromReadFailed = -10404, "SAF_ERROR_EEPROM_READ_FAILED";
    EepromReadIncomplete = -10405, "SAF_ERROR_EEPROM_READ_INCOMPLETE";
    EepromOverread = -10406, "SAF_ERROR_EEPROM_OVERREAD";
    EepromReadSetDeviceAddrFailed = -10407, "SAF_ERROR_EEPROM_READ_SET_DEVICE_ADDR_FAILED";
    EepromReadSetAddrFailed = -10408, "SAF_ERROR_EEPROM_READ_SET_ADDR_FAILED";
    EepromWriteTimeout = -10409, "SAF_ERROR_EEPROM_WRITE_TIMEOUT";
    EepromWriteFailed = -10410, "SAF_ERROR_EEPROM_WRITE_FAILED";
    EepromWriteIncomplete = -10411, "SAF_ERROR_EEPROM_WRITE_INCOMPLETE";
    EepromOverwrite = -10412, "SAF_ERROR_EEPROM_OVERWRITE";
    EepromWriteSetDeviceAddrFailed = -10413, "SAF_ERROR_EEPROM_WRITE_SET_DEVICE_ADDR_FAILED";
    EepromInvalidBank = -10414, "SAF_ERROR_EEPROM_INVALID_BANK";
    EepromInvalidMagic = -10415, "SAF_ERROR_EEPROM_INVALID_MAGIC";
    EepromInvalidVersion = -10416, "SAF_ERROR_EEPROM_INVALID_VERSION";
    EepromInvalidCrc = -10417, "SAF_ERROR_EEPROM_INVALID_CRC";
    EepromBankLocked = -10418, "SAF_ERROR_EEPROM_BANK_LOCKED";
    InvalidMemoryRange = -10500, "SAF_ERROR_INVALID_MEMORY_RANGE";
    CaptureTimeout = -10600, "SAF_ERROR_CAPTURE_TIMEOUT";
    InvalidTxphyRegister = -10700, "SAF_ERROR_INVALID_TXPHY_REGISTER";
    InvalidRxphyRegister = -10701, "SAF_ERROR_INVALID_RXPHY_REGISTER";
    InvalidCalibRegister = -10702, "SAF_ERROR_INVALID_CALIB_REGISTER";
    InvalidArmRegister = -10703, "SAF_ERROR_INVALID_ARM_REGISTER";
    InvalidRfeRegister = -10704, "SAF_ERROR_INVALID_RFE_REGISTER";
    InvalidEeprom0Register = -10705, "SAF_ERROR_INVALID_EEPROM0_REGISTER";
    InvalidEeprom1Register = -10706, "SAF_ERROR_INVALID_EEPROM1_REGISTER";
    InvalidEeprom2Register = -10707, "SAF_ERROR_INVALID_EEPROM2_REGISTER";
    InvalidBankRead = -10708, "SAF_ERROR_INVALID_BANK_READ";
    InvalidBankWrite = -10709, "SAF_ERROR_INVALID_BANK_WRITE";
    GpioInvalidCmd = -10800, "SAF_ERROR_GPIO_INVALID_CMD";
    GpioInternalError = -10801, "SAF_ERROR_GPIO_INTERNAL_ERROR";
    InvalidArmlogType = -10900, "SAF_ERROR_INVALID_ARMLOG_TYPE";
    InvalidDsplogType = -10901, "SAF_ERROR_INVALID_DSPLOG_TYPE";
    ArmlogInternalError = -10902, "SAF_ERROR_ARMLOG_INTERNAL_ERROR";
    C2xsecMsgTooShortNoUsn = -11000, "SAF_ERROR_C2XSEC_MSG_TOO_SHORT_NO_USN";
    C2xsecCmdTooShort = -11001, "SAF_ERROR_C2XSEC_CMD_TOO_SHORT";
    C2xsecInsNotSupported = -11002, "SAF_ERROR_C2XSEC_INS_NOT_SUPPORTED";
    C2xsecCurveidInvalid = -11003, "SAF_ERROR_C2XSEC_CURVEID_INVALID";
    C2xsecSizeMismatchForCurveid = -11004, "SAF_ERROR_C2XSEC_SIZE_MISMATCH_FOR_CURVEID";
    C2xsecRepkWrongLc = -11005, "SAF_ERROR_C2XSEC_REPK_WRONG_LC";
    C2xsecRepkWrongLength = -11006, "SAF_ERROR_C2XSEC_REPK_WRONG_LENGTH";
    C2xsecDpkWrongLc = -11007, "SAF_ERROR_C2XSEC_DPK_WRONG_LC";
    C2xsecDpkWrongLength = -11008, "SAF_ERROR_C2XSEC_DPK_WRONG_LENGTH";
    C2xsecVsohWrongLc = -11009, "SAF_ERROR_C2XSEC_VSOH_WRONG_LC";
    C2xsecVsohWrongLength = -11010, "SAF_ERROR_C2XSEC_VSOH_WRONG_LENGTH";
    C2xsecDpkVsohWrongLc = -11011, "SAF_ERROR_C2XSEC_DPK_VSOH_WRONG_LC";
    C2xsecDpkVsohWrongLength = -11012, "SAF_ERROR_C2XSEC_DPK_VSOH_WRONG_LENGTH";
    C2xsecNist256VsohTimeout = -11013, "SAF_ERROR_C2XSEC_NIST256_VSOH_TIMEOUT";
    C2xsecNist256DpkVsohTimeout = -11014, "SAF_ERROR_C2XSEC_NIST256_DPK_VSOH_TIMEOUT";
    C2xsecNist256DpkTimeout = -11015, "SAF_ERROR_C2XSEC_NIST256_DPK_TIMEOUT";
    C2xsecNist256RepkTimeout = -11016, "SAF_ERROR_C2XSEC_NIST256_REPK_TIMEOUT";
    C2xsecBp256r1VsohTimeout = -11017, "SAF_ERROR_C2XSEC_BP256R1_VSOH_TIMEOUT";
    C2xsecBp256r1DpkVsohTimeout = -11018, "SAF_ERROR_C2XSEC_BP256R1_DPK_VSOH_TIMEOUT";
    C2xsecBp256r1DpkTimeout = -11019, "SAF_ERROR_C2XSEC_BP256R1_DPK_TIMEOUT";
    C2xsecBp256r1RepkTimeout = -11020, "SAF_ERROR_C2XSEC_BP256R1_REPK_TIMEOUT";
    C2xsecBp384r1VsohTimeout = -11021, "SAF_ERROR_C2XSEC_BP384R1_VSOH_TIMEOUT";
    C2xsecBp384r1DpkVsohTimeout = -11022, "SAF_ERROR_C2XSEC_BP384R1_DPK_VSOH_TIMEOUT";
    C2xsecBp384r1DpkTimeout = -11023, "SAF_ERROR_C2XSEC_BP384R1_DPK_TIMEOUT";
    C2xsecBp384r1RepkTimeout = -11024, "SAF_ERROR_C2XSEC_BP384R1_REPK_TIMEOUT";
    C2xsecNist256SelftestVsohfTimeout = -11025, "SAF_ERROR_C2XSEC_NIST256_SELFTEST_VSOHF_TIMEOUT";
    C2xsecNist256SelftestVsohfMismatch = -11026, "SAF_ERROR_C2XSEC_NIST256_SELFTEST_VSOHF_MISMATCH";
    C2xsecNist256SelftestVsohpTimeout = -11027, "SAF_ERROR_C2XSEC_NIST256_SELFTEST_VSOHP_TIMEOUT";
    C2xsecNist256SelftestVsohpMismatch = -11028, "SAF_ERROR_C2XSEC_NIST256_SELFTEST_VSOHP_MISMATCH";
    C2xsecNist256SelftestDpkTimeout = -11029, "SAF_ERROR_C2XSEC_NIST256_SELFTEST_DPK_TIMEOUT";
    C2xsecNist256SelftestDpkMismatch = -11030, "SAF_ERROR_C2XSEC_NIST256_SELFTEST_DPK_MISMATCH";
    C2xsecNist256SelftestRepkTimeout = -11031, "SAF_ERROR_C2XSEC_NIST256_SELFTEST_REPK_TIMEOUT";
    C2xsecNist256SelftestRepkMismatch = -11032, "SAF_ERROR_C2XSEC_NIST256_SELFTEST_REPK_MISMATCH";
    C2xsecMemoryCorruption1 = -11033, "SAF_ERROR_C2XSEC_MEMORY_CORRUPTION_1";
    C2xsecMemoryCorruption2 = -11034, "SAF_ERROR_C2XSEC_MEMORY_CORRUPTION_2";
    C2xsecMemoryCorruption3 = -11035, "SAF_ERROR_C2XSEC_MEMORY_CORRUPTION_3";
    C2xsecMemoryCorruption4 = -11036, "SAF_ERROR_C2XSEC_MEMORY_CORRUPTION_4";
    Invalid1ppsEvent = -11100, "SAF_ERROR_INVALID_1PPS_EVENT";
    InvalidApiversionLength = -11200, "SAF_ERROR_INVALID_APIVERSION_LENGTH";
    InvalidTxpacketLength = -11201, "SAF_ERROR_INVALID_TXPACKET_LENGTH";
    InvalidRadioconfigLength = -11202, "SAF_ERROR_INVALID_RADIOCONFIG_LENGTH";
    InvalidFlushqLength = -11203, "SAF_ERROR_INVALID_FLUSHQ_LENGTH";
    InvalidSetTsfLength = -11204, "SAF_ERROR_INVALID_SET_TSF_LENGTH";
    InvalidGetTsfLength = -11205, "SAF_ERROR_INVALID_GET_TSF_LENGTH";
    InvalidDebugmsgLength = -11206, "SAF_ERROR_INVALID_DEBUGMSG_LENGTH";
    InvalidCalibrationLength = -11207, "SAF_ERROR_INVALID_CALIBRATION_LENGTH";
    InvalidTempLength = -11208, "SAF_ERROR_INVALID_TEMP_LENGTH";
    InvalidAuxadccfgLength = -11209, "SAF_ERROR_INVALID_AUXADCCFG_LENGTH";
    InvalidLogLength = -11210, "SAF_ERROR_INVALID_LOG_LENGTH";
    InvalidGpioLength = -11211, "SAF_ERROR_INVALID_GPIO_LENGTH";
    InvalidResetLength = -11212, "SAF_ERROR_INVALID_RESET_LENGTH";
    InvalidFaultLength = -11213, "SAF_ERROR_INVALID_FAULT_LENGTH";
    SdioErrorCallback = -11300, "SAF_ERROR_SDIO_ERROR_CALLBACK";
    SdioWriteFailed = -11301, "SAF_ERROR_SDIO_WRITE_FAILED";
    SdioUploadTimeout = -11302, "SAF_ERROR_SDIO_UPLOAD_TIMEOUT";
    SdioQueueSyncFailure = -11303, "SAF_ERROR_SDIO_QUEUE_SYNC_FAILURE";
    DspInvalidRadioMode = -11400, "SAF_ERROR_DSP_INVALID_RADIO_MODE";
    DspSetTsfCmdInvalid = -11401, "SAF_ERROR_DSP_SET_TSF_CMD_INVALID";
    DspInitWatchdog = -11402, "SAF_ERROR_DSP_INIT_WATCHDOG";
    DspRxmacInitWatchdog = -11403, "SAF_ERROR_DSP_RXMAC_INIT_WATCHDOG";
    EthConfigFailed = -11500, "SAF_ERROR_ETH_CONFIG_FAILED";
    EthDrvInitFailed = -11501, "SAF_ERROR_ETH_DRV_INIT_FAILED";
    EthDrvConfigFailed = -11502, "SAF_ERROR_ETH_DRV_CONFIG_FAILED";
    EthArpInitFailed = -11503, "SAF_ERROR_ETH_ARP_INIT_FAILED";
    EthArpResolveFailed = -11504, "SAF_ERROR_ETH_ARP_RESOLVE_FAILED";
    EthSocketInitFailed = -11505, "SAF_ERROR_ETH_SOCKET_INIT_FAILED";
    EthInvalidTxSocket = -11506, "SAF_ERROR_ETH_INVALID_TX_SOCKET";
    EthInvalidRxSocket = -11507, "SAF_ERROR_ETH_INVALID_RX_SOCKET";
    EthInitialSendFailed = -11508, "SAF_ERROR_ETH_INITIAL_SEND_FAILED";
    EthUdpSendFailed = -11509, "SAF_ERROR_ETH_UDP_SEND_FAILED";
    EthUploadTimeout = -11510, "SAF_ERROR_ETH_UPLOAD_TIMEOUT";
    CstRangeInvalid = -11600, "SAF_ERROR_CST_RANGE_INVALID";
    CstTestFailed = -11601, "SAF_ERROR_CST_TEST_FAILED";
    SpiDmaAcqFailed = -11700, "SAF_ERROR_SPI_DMA_ACQ_FAILED";
    SpiConfigFailed = -11701, "SAF_ERROR_SPI_CONFIG_FAILED";
    SpiInitRwFailed = -11702, "SAF_ERROR_SPI_INIT_RW_FAILED";
    SpiDavTimeout = -11703, "SAF_ERROR_SPI_DAV_TIMEOUT";
    SpiErrorCallback = -11704, "SAF_ERROR_SPI_ERROR_CALLBACK";
    TxwmacDmaAcqFailed = -11800, "SAF_ERROR_TXWMAC_DMA_ACQ_FAILED";
    TxwmacDmaSetChanConfigFailed = -11801, "SAF_ERROR_TXWMAC_DMA_SET_CHAN_CONFIG_FAILED";
    TxwmacDmaSetListenerFailed = -11802, "SAF_ERROR_TXWMAC_DMA_SET_LISTENER_FAILED";
    TxwmacDmaChanEnabledFailed = -11803, "SAF_ERROR_TXWMAC_DMA_CHAN_ENABLED_FAILED";
    TxwmacDma1Timeout = -11804, "SAF_ERROR_TXWMAC_DMA1_TIMEOUT";
    TxwmacDma2Timeout = -11805, "SAF_ERROR_TXWMAC_DMA2_TIMEOUT";
    TxwmacDma1InvalidEvent = -11806, "SAF_ERROR_TXWMAC_DMA1_INVALID_EVENT";
    TxwmacDma2InvalidEvent = -11807, "SAF_ERROR_TXWMAC_DMA2_INVALID_EVENT";
    DspMsgSendBlocked = -11900, "SAF_ERROR_DSP_MSG_SEND_BLOCKED";
    DspCmdSendBlocked = -11901, "SAF_ERROR_DSP_CMD_SEND_BLOCKED";
    TxmacTxpacketMalformed = -12000, "SAF_ERROR_TXMAC_TXPACKET_MALFORMED";
    TxmacTxpacketLengthTooLong = -12001, "SAF_ERROR_TXMAC_TXPACKET_LENGTH_TOO_LONG";
    TxmacTxpacketMgmtLengthTooLong = -12002, "SAF_ERROR_TXMAC_TXPACKET_MGMT_LENGTH_TOO_LONG";
    TxphyTxpacketPtrInvalid = -12003, "SAF_ERROR_TXPHY_TXPACKET_PTR_INVALID";
    TxphyTxpacketMalformed = -12004, "SAF_ERROR_TXPHY_TXPACKET_MALFORMED";
    TempI2cAnt1Failed = -12100, "SAF_ERROR_TEMP_I2C_ANT1_FAILED";
    TempI2cAnt2Failed = -12101, "SAF_ERROR_TEMP_I2C_ANT2_FAILED";
    TempAnalogAnt1Failed = -12102, "SAF_ERROR_TEMP_ANALOG_ANT1_FAILED";
    TempAnalogAnt2Failed = -12103, "SAF_ERROR_TEMP_ANALOG_ANT2_FAILED";
    TempPowercalAnt1Invalid = -12104, "SAF_ERROR_TEMP_POWERCAL_ANT1_INVALID";
    TempPowercalAnt2Invalid = -12105, "SAF_ERROR_TEMP_POWERCAL_ANT2_INVALID";
    TxSfencFailed = -12200, "SAF_ERROR_TX_SFENC_FAILED";
    TxPayloadencFailed = -12201, "SAF_ERROR_TX_PAYLOADENC_FAILED";
    TxPowercalAnt1Invalid = -12202, "SAF_ERROR_TX_POWERCAL_ANT1_INVALID";
    TxPowercalAnt2Invalid = -12203, "SAF_ERROR_TX_POWERCAL_ANT2_INVALID";
    TxCyclicshiftInvalid = -12204, "SAF_ERROR_TX_CYCLICSHIFT_INVALID";
    RxRxsfFailed = -12300, "SAF_ERROR_RX_RXSF_FAILED";
    RxRxredecodeFailed = -12301, "SAF_ERROR_RX_RXREDECODE_FAILED";
    RxAgcunfreezeTimeout = -12302, "SAF_ERROR_RX_AGCUNFREEZE_TIMEOUT";
    RxCoarsetimingFailure = -12303, "SAF_ERROR_RX_COARSETIMING_FAILURE";
    RxStartInvalidAnt = -12304, "SAF_ERROR_RX_START_INVALID_ANT";
    TxrxloopbackDecodeFailed = -12400, "SAF_ERROR_TXRXLOOPBACK_DECODE_FAILED";
    TxrxloopbackRxredecodeFailed = -12401, "SAF_ERROR_TXRXLOOPBACK_RXREDECODE_FAILED";
    TxrxloopbackRxsfFailed = -12402, "SAF_ERROR_TXRXLOOPBACK_RXSF_FAILED";
    TxrxloopbackCoarsetimeFailed = -12403, "SAF_ERROR_TXRXLOOPBACK_COARSETIME_FAILED";
    RfeTimeoutCaltrx = -12500, "SAF_ERROR_RFE_TIMEOUT_CALTRX";
    RfeTimeoutNewradioconfig = -12501, "SAF_ERROR_RFE_TIMEOUT_NEWRADIOCONFIG";
    RfeTimeoutConfiginit = -12502, "SAF_ERROR_RFE_TIMEOUT_CONFIGINIT";
    RfeTimeoutGpiopinupdate = -12503, "SAF_ERROR_RFE_TIMEOUT_GPIOPINUPDATE";
    RfeTimeoutRegisterwrite = -12504, "SAF_ERROR_RFE_TIMEOUT_REGISTERWRITE";
    LlcUploadOverflowApiversion = -12600, "SAF_ERROR_LLC_UPLOAD_OVERFLOW_APIVERSION";
    LlcUploadOverflowTxpacket = -12601, "SAF_ERROR_LLC_UPLOAD_OVERFLOW_TXPACKET";
    LlcUploadOverflowGpio = -12602, "SAF_ERROR_LLC_UPLOAD_OVERFLOW_GPIO";
    LlcUploadOverflowLoopback = -12603, "SAF_ERROR_LLC_UPLOAD_OVERFLOW_LOOPBACK";
    LlcUploadOverflowFault = -12604, "SAF_ERROR_LLC_UPLOAD_OVERFLOW_FAULT";
    LlcUploadOverflowCompensator = -12605, "SAF_ERROR_LLC_UPLOAD_OVERFLOW_COMPENSATOR";
    LlcUploadOverflowCalibration = -12606, "SAF_ERROR_LLC_UPLOAD_OVERFLOW_CALIBRATION";
    CompensatorTimeout = -12700, "SAF_ERROR_COMPENSATOR_TIMEOUT";
    CompensatorCrcFailure = -12701, "SAF_ERROR_COMPENSATOR_CRC_FAILURE";
    CompensatorPowercalAnt1Invalid = -12702, "SAF_ERROR_COMPENSATOR_POWERCAL_ANT1_INVALID";
    CompensatorPowercalAnt2Invalid = -12703, "SAF_ERROR_COMPENSATOR_POWERCAL_ANT2_INVALID";
    CompensatorNoDataReceived = -12704, "SAF_ERROR_COMPENSATOR_NO_DATA_RECEIVED";
    TimesyncInternalFailure = -12800, "SAF_ERROR_TIMESYNC_INTERNAL_FAILURE";
    RxwmacCorruptPacket = -12900, "SAF_ERROR_RXWMAC_CORRUPT_PACKET";
    FsmMemEccDoubleOverflowArmimem = -13000, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_OVERFLOW_ARMIMEM";
    FsmMemEccDoubleArmimem = -13001, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_ARMIMEM";
    FsmMemEccDoubleOverflowArmdmem = -13002, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_OVERFLOW_ARMDMEM";
    FsmMemEccDoubleArmdmem = -13003, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_ARMDMEM";
    FsmMemEccDoubleOverflowEcdsa = -13004, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_OVERFLOW_ECDSA";
    FsmMemEccDoubleEcdsa = -13005, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_ECDSA";
    FsmMemParityOverflowSysmem = -13006, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_SYSMEM";
    FsmMemParitySysmem = -13007, "SAF_ERROR_FSM_MEM_PARITY_SYSMEM";
    FsmMemParityOverflowEmactx = -13008, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_EMACTX";
    FsmMemParityEmactx = -13009, "SAF_ERROR_FSM_MEM_PARITY_EMACTX";
    FsmMemParityOverflowEmacrx = -13010, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_EMACRX";
    FsmMemParityEmacrx = -13011, "SAF_ERROR_FSM_MEM_PARITY_EMACRX";
    FsmMemParityOverflowSdiosram = -13012, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_SDIOSRAM";
    FsmMemParitySdiosram = -13013, "SAF_ERROR_FSM_MEM_PARITY_SDIOSRAM";
    FsmMemParityOverflowSdiocissram = -13014, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_SDIOCISSRAM";
    FsmMemParitySdiocissram = -13015, "SAF_ERROR_FSM_MEM_PARITY_SDIOCISSRAM";
    FsmMemParityOverflowCrypto0 = -13016, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_CRYPTO0";
    FsmMemParityCrypto0 = -13017, "SAF_ERROR_FSM_MEM_PARITY_CRYPTO0";
    FsmMemParityOverflowCrypto1 = -13018, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_CRYPTO1";
    FsmMemParityCrypto1 = -13019, "SAF_ERROR_FSM_MEM_PARITY_CRYPTO1";
    FsmMemEccDoubleOverflowBbeiram0 = -13020, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_OVERFLOW_BBEIRAM0";
    FsmMemEccDoubleBbeiram0 = -13021, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_BBEIRAM0";
    FsmMemEccDoubleOverflowBbeiram1 = -13022, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_OVERFLOW_BBEIRAM1";
    FsmMemEccDoubleBbeiram1 = -13023, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_BBEIRAM1";
    FsmMemParityOverflowBbedram00 = -13024, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_BBEDRAM00";
    FsmMemParityBbedram00 = -13025, "SAF_ERROR_FSM_MEM_PARITY_BBEDRAM00";
    FsmMemParityOverflowBbedram01 = -13026, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_BBEDRAM01";
    FsmMemParityBbedram01 = -13027, "SAF_ERROR_FSM_MEM_PARITY_BBEDRAM01";
    FsmMemParityOverflowBbedram02 = -13028, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_BBEDRAM02";
    FsmMemParityBbedram02 = -13029, "SAF_ERROR_FSM_MEM_PARITY_BBEDRAM02";
    FsmMemParityOverflowBbedram03 = -13030, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_BBEDRAM03";
    FsmMemParityBbedram03 = -13031, "SAF_ERROR_FSM_MEM_PARITY_BBEDRAM03";
    FsmMemParityOverflowBbedram10 = -13032, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_BBEDRAM10";
    FsmMemParityBbedram10 = -13033, "SAF_ERROR_FSM_MEM_PARITY_BBEDRAM10";
    FsmMemParityOverflowBbedram11 = -13034, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_BBEDRAM11";
    FsmMemParityBbedram11 = -13035, "SAF_ERROR_FSM_MEM_PARITY_BBEDRAM11";
    FsmMemParityOverflowOrbitsp0 = -13036, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_ORBITSP0";
    FsmMemParityOrbitsp0 = -13037, "SAF_ERROR_FSM_MEM_PARITY_ORBITSP0";
    FsmMemParityOverflowOrbitsp1 = -13038, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_ORBITSP1";
    FsmMemParityOrbitsp1 = -13039, "SAF_ERROR_FSM_MEM_PARITY_ORBITSP1";
    FsmMemParityOverflowOrbitsp2 = -13040, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_ORBITSP2";
    FsmMemParityOrbitsp2 = -13041, "SAF_ERROR_FSM_MEM_PARITY_ORBITSP2";
    FsmMemParityOverflowOrbitsp3 = -13042, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_ORBITSP3";
    FsmMemParityOrbitsp3 = -13043, "SAF_ERROR_FSM_MEM_PARITY_ORBITSP3";
    FsmMemParityOverflowOrbitdp0 = -13044, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_ORBITDP0";
    FsmMemParityOrbitdp0 = -13045, "SAF_ERROR_FSM_MEM_PARITY_ORBITDP0";
    FsmMemParityOverflowOrbitdp1 = -13046, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_ORBITDP1";
    FsmMemParityOrbitdp1 = -13047, "SAF_ERROR_FSM_MEM_PARITY_ORBITDP1";
    FsmMemEccDoubleOverflowX2 = -13048, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_OVERFLOW_X2";
    FsmMemEccDoubleX2 = -13049, "SAF_ERROR_FSM_MEM_ECC_DOUBLE_X2";
    FsmMemParityOverflowX2dmem0 = -13050, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_X2DMEM0";
    FsmMemParityX2dmem0 = -13051, "SAF_ERROR_FSM_MEM_PARITY_X2DMEM0";
    FsmMemParityOverflowX2dmem1 = -13052, "SAF_ERROR_FSM_MEM_PARITY_OVERFLOW_X2DMEM1";
    FsmMemParityX2dmem1 = -13053, "SAF_ERROR_FSM_MEM_PARITY_X2DMEM1";
    FsmMemEccSingleOverflowArmimem = -13070, "SAF_ERROR_FSM_MEM_ECC_SINGLE_OVERFLOW_ARMIMEM";
    FsmMemEccSingleArmimem = -13071, "SAF_ERROR_FSM_MEM_ECC_SINGLE_ARMIMEM";
    FsmMemEccSingleOverflowArmdmem = -13072, "SAF_ERROR_FSM_MEM_ECC_SINGLE_OVERFLOW_ARMDMEM";
    FsmMemEccSingleArmdmem = -13073, "SAF_ERROR_FSM_MEM_ECC_SINGLE_ARMDMEM";
    FsmMemEccSingleOverflowEcdsa = -13074, "SAF_ERROR_FSM_MEM_ECC_SINGLE_OVERFLOW_ECDSA";
    FsmMemEccSingleEcdsa = -13075, "SAF_ERROR_FSM_MEM_ECC_SINGLE_ECDSA";
    FsmMemEccSingleOverflowBbeiram0 = -13076, "SAF_ERROR_FSM_MEM_ECC_SINGLE_OVERFLOW_BBEIRAM0";
    FsmMemEccSingleBbeiram0 = -13077, "SAF_ERROR_FSM_MEM_ECC_SINGLE_BBEIRAM0";
    FsmMemEccSingleOverflowBbeiram1 = -13078, "SAF_ERROR_FSM_MEM_ECC_SINGLE_OVERFLOW_BBEIRAM1";
    FsmMemEccSingleBbeiram1 = -13079, "SAF_ERROR_FSM_MEM_ECC_SINGLE_BBEIRAM1";
    FsmMemEccSingleOverflowX2 = -13080, "SAF_ERROR_FSM_MEM_ECC_SINGLE_OVERFLOW_X2";
    FsmMemEccSingleX2 = -13081, "SAF_ERROR_FSM_MEM_ECC_SINGLE_X2";
    FsmMemDspIllegalWrite = -13088, "SAF_ERROR_FSM_MEM_DSP_ILLEGAL_WRITE";
    FsmArmWatchdog = -13089, "SAF_ERROR_FSM_ARM_WATCHDOG";
    FsmDspWatchdog = -13090, "SAF_ERROR_FSM_DSP_WATCHDOG";
    FsmX2Watchdog = -13091, "SAF_ERROR_FSM_X2_WATCHDOG";
    FsmArmPll0Unlock = -13092, "SAF_ERROR_FSM_ARM_PLL0_UNLOCK";
    FsmArmPll1Unlock = -13093, "SAF_ERROR_FSM_ARM_PLL1_UNLOCK";
    FsmX2PllUnlock = -13094, "SAF_ERROR_FSM_X2_PLL_UNLOCK";
    CstExceptionTestSvc = -14000, "SAF_ERROR_CST_EXCEPTION_TEST_SVC";
    CstExceptionTestPendsv = -14001, "SAF_ERROR_CST_EXCEPTION_TEST_PENDSV";
    CstExceptionTestSystick = -14002, "SAF_ERROR_CST_EXCEPTION_TEST_SYSTICK";
    CstExceptionHardFault1 = -14003, "SAF_ERROR_CST_EXCEPTION_HARD_FAULT1";
    CstExceptionHardFault2 = -14004, "SAF_ERROR_CST_EXCEPTION_HARD_FAULT2";
    CstExceptionUsageFault = -14005, "SAF_ERROR_CST_EXCEPTION_USAGE_FAULT";
    CstExceptionMemFault = -14006, "SAF_ERROR_CST_EXCEPTION_MEM_FAULT";
    CstExceptionBusFault = -14007, "SAF_ERROR_CST_EXCEPTION_BUS_FAULT";
    CstExceptionTestNmihf = -14008, "SAF_ERROR_CST_EXCEPTION_TEST_NMIHF";
    CstExceptionTestTailchain = -14009, "SAF_ERROR_CST_EXCEPTION_TEST_TAILCHAIN";
    CstExceptionTestMasking = -14010, "SAF_ERROR_CST_EXCEPTION_TEST_MASKING";
    CstExceptionTestHandler = -14011, "SAF_ERROR_CST_EXCEPTION_TEST_HANDLER";
    CstRegbankTest4 = -14012, "SAF_ERROR_CST_REGBANK_TEST4";
    CstAluTest7 = -14013, "SAF_ERROR_CST_ALU_TEST7";
    CstBranchTest3 = -14014, "SAF_ERROR_CST_BRANCH_TEST3";
    CstStatusTest3 = -14015, "SAF_ERROR_CST_STATUS_TEST3";
    CstRegbankTest6 = -14016, "SAF_ERROR_CST_REGBANK_TEST6";
    CstFetchTest = -14017, "SAF_ERROR_CST_FETCH_TEST";
    CstLoadstoreTest6 = -14018, "SAF_ERROR_CST_LOADSTORE_TEST6";
    CstLoadstoreTest1 = -14019, "SAF_ERROR_CST_LOADSTORE_TEST1";
    CstLoadstoreTest2 = -14020, "SAF_ERROR_CST_LOADSTORE_TEST2";
    CstLoadstoreTest3 = -14021, "SAF_ERROR_CST_LOADSTORE_TEST3";
    CstLoadstoreTest4 = -14022, "SAF_ERROR_CST_LOADSTORE_TEST4";
    CstLoadstoreTest5 = -14023, "SAF_ERROR_CST_LOADSTORE_TEST5";
    CstRegbankTest1 = -14024, "SAF_ERROR_CST_REGBANK_TEST1";
    CstRegbankTest2 = -14025, "SAF_ERROR_CST_REGBANK_TEST2";
    CstRegbankTest3 = -14026, "SAF_ERROR_CST_REGBANK_TEST3";
    CstRegbankTest5 = -14027, "SAF_ERROR_CST_REGBANK_TEST5";
    CstAluTest1 = -14028, "SAF_ERROR_CST_ALU_TEST1";
    CstAluTest2 = -14029, "SAF_ERROR_CST_ALU_TEST2";
    CstAluTest3 = -14030, "SAF_ERROR_CST_ALU_TEST3";
    CstAluTest4 = -14031, "SAF_ERROR_CST_ALU_TEST4";
    CstAluTest5 = -14032, "SAF_ERROR_CST_ALU_TEST5";
    CstAluTest6 = -14033, "SAF_ERROR_CST_ALU_TEST6";
    CstBranchTest1 = -14034, "SAF_ERROR_CST_BRANCH_TEST1";
    CstStatusTest1 = -14035, "SAF_ERROR_CST_STATUS_TEST1";
    CstMacTest1 = -14036, "SAF_ERROR_CST_MAC_TEST1";
    CstMacTest2 = -14037, "SAF_ERROR_CST_MAC_TEST2";
    CstStatusTest2 = -14038, "SAF_ERROR_CST_STATUS_TEST2";
    CstBranchTest2 = -14039, "SAF_ERROR_CST_BRANCH_TEST2";
    PstCguOutclk0Saferef = -14100, "SAF_ERROR_PST_CGU_OUTCLK0_SAFEREF";
    PstCguOutclk1Arm = -14101, "SAF_ERROR_PST_CGU_OUTCLK1_ARM";
    PstCguOutclk2Hspi = -14102, "SAF_ERROR_PST_CGU_OUTCLK2_HSPI";
    PstCguOutclk3Aes = -14103, "SAF_ERROR_PST_CGU_OUTCLK3_AES";
    PstCguOutclk4Ba414ep = -14104, "SAF_ERROR_PST_CGU_OUTCLK4_BA414EP";
    PstCguOutclk5Sysapb = -14105, "SAF_ERROR_PST_CGU_OUTCLK5_SYSAPB";
    PstCguOutclk6Wdt = -14106, "SAF_ERROR_PST_CGU_OUTCLK6_WDT";
    PstCguOutclk7Periapb = -14107, "SAF_ERROR_PST_CGU_OUTCLK7_PERIAPB";
    PstCguOutclk8I2c = -14108, "SAF_ERROR_PST_CGU_OUTCLK8_I2C";
    PstCguOutclk9Uart = -14109, "SAF_ERROR_PST_CGU_OUTCLK9_UART";
    PstCguOutclk10Qspi = -14110, "SAF_ERROR_PST_CGU_OUTCLK10_QSPI";
    PstCguOutclk11Bbe16 = -14111, "SAF_ERROR_PST_CGU_OUTCLK11_BBE16";
    PstCguOutclk12Timer = -14112, "SAF_ERROR_PST_CGU_OUTCLK12_TIMER";
    PstCguOutclk13Rmii = -14113, "SAF_ERROR_PST_CGU_OUTCLK13_RMII";
    PstCguOutclk14Rmiirx = -14114, "SAF_ERROR_PST_CGU_OUTCLK14_RMIIRX";
    PstCguOutclk15Rgmiitx = -14115, "SAF_ERROR_PST_CGU_OUTCLK15_RGMIITX";
    PstCguOutclk16Refclk1 = -14116, "SAF_ERROR_PST_CGU_OUTCLK16_REFCLK1";
    PstCguOutclk17Refclk2 = -14117, "SAF_ERROR_PST_CGU_OUTCLK17_REFCLK2";
    PstCguOutclk18Wrck = -14118, "SAF_ERROR_PST_CGU_OUTCLK18_WRCK";
    PstBusSys = -14119, "SAF_ERROR_PST_BUS_SYS";
    PstBusArmTimers = -14120, "SAF_ERROR_PST_BUS_ARM_TIMERS";
    PstBusRfeTimer = -14121, "SAF_ERROR_PST_BUS_RFE_TIMER";
    PstBusOrbitStateCrc = -14122, "SAF_ERROR_PST_BUS_ORBIT_STATE_CRC";
    PstChipInfraRgu = -14123, "SAF_ERROR_PST_CHIP_INFRA_RGU";
    PstChipInfraCreg = -14124, "SAF_ERROR_PST_CHIP_INFRA_CREG";
    PstChipInfraScuBank2 = -14125, "SAF_ERROR_PST_CHIP_INFRA_SCU_BANK2";
    PstChipInfraScuBank3 = -14126, "SAF_ERROR_PST_CHIP_INFRA_SCU_BANK3";
    PstChipInfraArmTimers = -14127, "SAF_ERROR_PST_CHIP_INFRA_ARM_TIMERS";
    PstChipInfraArmWdt = -14128, "SAF_ERROR_PST_CHIP_INFRA_ARM_WDT";
    PstChipInfraDspWdt = -14129, "SAF_ERROR_PST_CHIP_INFRA_DSP_WDT";
    PstPeriphInfraUart1 = -14132, "SAF_ERROR_PST_PERIPH_INFRA_UART1";
    PstPeriphInfraUart2 = -14133, "SAF_ERROR_PST_PERIPH_INFRA_UART2";
    PstPeriphInfraUart3 = -14134, "SAF_ERROR_PST_PERIPH_INFRA_UART3";
    PstPeriphInfraUart4 = -14135, "SAF_ERROR_PST_PERIPH_INFRA_UART4";
    PstPeriphInfraQspi = -14136, "SAF_ERROR_PST_PERIPH_INFRA_QSPI";
    PstPeriphInfraI2c = -14137, "SAF_ERROR_PST_PERIPH_INFRA_I2C";
    PstPeriphInfraI2cint = -14138, "SAF_ERROR_PST_PERIPH_INFRA_I2CINT";
    PstPeriphInfraGpioToggle = -14139, "SAF_ERROR_PST_PERIPH_INFRA_GPIO_TOGGLE";
    PstPeriphInfraGpioLoopback = -14140, "SAF_ERROR_PST_PERIPH_INFRA_GPIO_LOOPBACK";
    PstDma = -14141, "SAF_ERROR_PST_DMA";
    PstEcdsa = -14142, "SAF_ERROR_PST_ECDSA";
    PstVerifyOtp = -14143, "SAF_ERROR_PST_VERIFY_OTP";
    PstOtpIntegrityNxp = -14144, "SAF_ERROR_PST_OTP_INTEGRITY_NXP";
    PstOtpIntegrityCustomer = -14145, "SAF_ERROR_PST_OTP_INTEGRITY_CUSTOMER";
    PstCguClocksOutofrange = -14200, "SAF_ERROR_PST_CGU_CLOCKS_OUTOFRANGE";
    PstCguClocksInvalidconfig = -14201, "SAF_ERROR_PST_CGU_CLOCKS_INVALIDCONFIG";
    PstOrbitFailureMcs0 = -14300, "SAF_ERROR_PST_ORBIT_FAILURE_MCS0";
    PstOrbitFailureMcs1 = -14301, "SAF_ERROR_PST_ORBIT_FAILURE_MCS1";
    PstOrbitFailureMcs2 = -14302, "SAF_ERROR_PST_ORBIT_FAILURE_MCS2";
    PstOrbitFailureMcs3 = -14303, "SAF_ERROR_PST_ORBIT_FAILURE_MCS3";
    PstOrbitFailureMcs4 = -14304, "SAF_ERROR_PST_ORBIT_FAILURE_MCS4";
    PstOrbitFailureMcs5 = -14305, "SAF_ERROR_PST_ORBIT_FAILURE_MCS5";
    PstOrbitFailureMcs6 = -14306, "SAF_ERROR_PST_ORBIT_FAILURE_MCS6";
    PstOrbitFailureMcs7 = -14307, "SAF_ERROR_PST_ORBIT_FAILURE_MCS7";
    MbistCompletedFailed = -14400, "SAF_ERROR_MBIST_COMPLETED_FAILED";
    MbistNotCompletedFailed = -14401, "SAF_ERROR_MBIST_NOT_COMPLETED_FAILED";
    BootStatusBootFailure = -14500, "SAF_ERROR_BOOT_STATUS_BOOT_FAILURE";
    BootStatusReadFailure = -14501, "SAF_ERROR_BOOT_STATUS_READ_FAILURE";
    BootStatusAuthFailure = -14502, "SAF_ERROR_BOOT_STATUS_AUTH_FAILURE";
    BootStatusIdVerfFailure = -14503, "SAF_ERROR_BOOT_STATUS_ID_VERF_FAILURE";
    BootStatusBshNotFound = -14504, "SAF_ERROR_BOOT_STATUS_BSH_NOT_FOUND";
    BootStatusBshEndedFailure = -14505, "SAF_ERROR_BOOT_STATUS_BSH_ENDED_FAILURE";
    BootStatusInvalidTargetAddr = -14506, "SAF_ERROR_BOOT_STATUS_INVALID_TARGET_ADDR";
    BootStatusInvalidCmd = -14507, "SAF_ERROR_BOOT_STATUS_INVALID_CMD";
    BootStatusInvalidBootMode = -14508, "SAF_ERROR_BOOT_STATUS_INVALID_BOOT_MODE";
    BootStatusFlashInvalidAddr = -14509, "SAF_ERROR_BOOT_STATUS_FLASH_INVALID_ADDR";
    BootStatusDecryptionFailure = -14510, "SAF_ERROR_BOOT_STATUS_DECRYPTION_FAILURE";
    BootStatusSecurityInitFailure = -14511, "SAF_ERROR_BOOT_STATUS_SECURITY_INIT_FAILURE";
    BootStatusSecurityOtpReadFailure = -14512, "SAF_ERROR_BOOT_STATUS_SECURITY_OTP_READ_FAILURE";
    BootStatusSecurityConfigMismatch = -14513, "SAF_ERROR_BOOT_STATUS_SECURITY_CONFIG_MISMATCH";
    BootStatusCrcCheckFailure = -14514, "SAF_ERROR_BOOT_STATUS_CRC_CHECK_FAILURE";
    BootStatusChunkIdVerfFailure = -14515, "SAF_ERROR_BOOT_STATUS_CHUNK_ID_VERF_FAILURE";
    BootStatusImgFormatMismatch = -14516, "SAF_ERROR_BOOT_STATUS_IMG_FORMAT_MISMATCH";
    BootStatusPubKeyVerfFailure = -14517, "SAF_ERROR_BOOT_STATUS_PUB_KEY_VERF_FAILURE";
    BootStatusCustomerOtpNotProg = -14518, "SAF_ERROR_BOOT_STATUS_CUSTOMER_OTP_NOT_PROG";
    BootStatusFlashInitFailure = -14519, "SAF_ERROR_BOOT_STATUS_FLASH_INIT_FAILURE";
    InvalidinputTxpktRadioid = -15000, "SAF_ERROR_INVALIDINPUT_TXPKT_RADIOID";
    InvalidinputTxpktChannelid = -15001, "SAF_ERROR_INVALIDINPUT_TXPKT_CHANNELID";
    InvalidinputTxpktTxant = -15002, "SAF_ERROR_INVALIDINPUT_TXPKT_TXANT";
    InvalidinputTxpktMcs = -15003, "SAF_ERROR_INVALIDINPUT_TXPKT_MCS";
    InvalidinputTxpktTxpower = -15004, "SAF_ERROR_INVALIDINPUT_TXPKT_TXPOWER";
    InvalidinputTxpktTxframelength = -15005, "SAF_ERROR_INVALIDINPUT_TXPKT_TXFRAMELENGTH";
    InvalidinputSettsfCmd = -15100, "SAF_ERROR_INVALIDINPUT_SETTSF_CMD";
    InvalidinputSettsfUtc = -15101, "SAF_ERROR_INVALIDINPUT_SETTSF_UTC";
    InvalidinputSettsfTsf = -15102, "SAF_ERROR_INVALIDINPUT_SETTSF_TSF";
    InvalidinputRadiocfgMode = -15200, "SAF_ERROR_INVALIDINPUT_RADIOCFG_MODE";
    InvalidinputRadiocfgChannelfreq = -15201, "SAF_ERROR_INVALIDINPUT_RADIOCFG_CHANNELFREQ";
    InvalidinputRadiocfgBw = -15202, "SAF_ERROR_INVALIDINPUT_RADIOCFG_BW";
    InvalidinputRadiocfgTxant = -15203, "SAF_ERROR_INVALIDINPUT_RADIOCFG_TXANT";
    InvalidinputRadiocfgRxant = -15204, "SAF_ERROR_INVALIDINPUT_RADIOCFG_RXANT";
    InvalidinputRadiocfgDefaultmcs = -15205, "SAF_ERROR_INVALIDINPUT_RADIOCFG_DEFAULTMCS";
    InvalidinputRadiocfgDefaulttxpower = -15206, "SAF_ERROR_INVALIDINPUT_RADIOCFG_DEFAULTTXPOWER";
    InvalidinputRadiocfgDualtxctrl = -15207, "SAF_ERROR_INVALIDINPUT_RADIOCFG_DUALTXCTRL";
    InvalidinputRadiocfgCsthresh = -15208, "SAF_ERROR_INVALIDINPUT_RADIOCFG_CSTHRESH";
    InvalidinputRadiocfgCbrthresh = -15209, "SAF_ERROR_INVALIDINPUT_RADIOCFG_CBRTHRESH";
    InvalidinputRadiocfgSlottime = -15210, "SAF_ERROR_INVALIDINPUT_RADIOCFG_SLOTTIME";
    InvalidinputRadiocfgDifstime = -15211, "SAF_ERROR_INVALIDINPUT_RADIOCFG_DIFSTIME";
    InvalidinputRadiocfgSifstime = -15212, "SAF_ERROR_INVALIDINPUT_RADIOCFG_SIFSTIME";
    InvalidinputRadiocfgEifstime = -15213, "SAF_ERROR_INVALIDINPUT_RADIOCFG_EIFSTIME";
    InvalidinputRadiocfgShortretry = -15214, "SAF_ERROR_INVALIDINPUT_RADIOCFG_SHORTRETRY";
    InvalidinputRadiocfgLongretry = -15215, "SAF_ERROR_INVALIDINPUT_RADIOCFG_LONGRETRY";
    InvalidinputRadiocfgAifs = -15216, "SAF_ERROR_INVALIDINPUT_RADIOCFG_AIFS";
    InvalidinputRadiocfgCwmin = -15217, "SAF_ERROR_INVALIDINPUT_RADIOCFG_CWMIN";
    InvalidinputRadiocfgCwmax = -15218, "SAF_ERROR_INVALIDINPUT_RADIOCFG_CWMAX";
    InvalidinputRadiocfgTxop = -15219, "SAF_ERROR_INVALIDINPUT_RADIOCFG_TXOP";
    InvalidinputRadiocfgInterval = -15220, "SAF_ERROR_INVALIDINPUT_RADIOCFG_INTERVAL";
    InvalidinputRadiocfgGuard = -15221, "SAF_ERROR_INVALIDINPUT_RADIOCFG_GUARD";
    InvalidinputFlushqRadioid = -15300, "SAF_ERROR_INVALIDINPUT_FLUSHQ_RADIOID";
    InvalidinputFlushqChannelid = -15301, "SAF_ERROR_INVALIDINPUT_FLUSHQ_CHANNELID";
    InvalidinputFlushqTxqueue = -15302, "SAF_ERROR_INVALIDINPUT_FLUSHQ_TXQUEUE";
    InvalidinputCalibVersion = -15400, "SAF_ERROR_INVALIDINPUT_CALIB_VERSION";
    InvalidinputCalibCompensatorsel = -15401, "SAF_ERROR_INVALIDINPUT_CALIB_COMPENSATORSEL";
    InvalidinputCalibTxpowercalmode = -15402, "SAF_ERROR_INVALIDINPUT_CALIB_TXPOWERCALMODE";
    InvalidinputCalibRssicalmode = -15403, "SAF_ERROR_INVALIDINPUT_CALIB_RSSICALMODE";
    InvalidinputCalibCompreturn = -15404, "SAF_ERROR_INVALIDINPUT_CALIB_COMPRETURN";
    InvalidinputCalibComppowerthresh = -15405, "SAF_ERROR_INVALIDINPUT_CALIB_COMPPOWERTHRESH";
    InvalidinputCalibCompalpha = -15406, "SAF_ERROR_INVALIDINPUT_CALIB_COMPALPHA";
    InvalidinputCalibCompbeta = -15407, "SAF_ERROR_INVALIDINPUT_CALIB_COMPBETA";
    InvalidinputCalibCompalphabeta = -15408, "SAF_ERROR_INVALIDINPUT_CALIB_COMPALPHABETA";
    InvalidinputCalibPalnapowerthresh = -15409, "SAF_ERROR_INVALIDINPUT_CALIB_PALNAPOWERTHRESH";
    InvalidinputCalibPalnaalpha = -15410, "SAF_ERROR_INVALIDINPUT_CALIB_PALNAALPHA";
    InvalidinputCalibPalnabeta = -15411, "SAF_ERROR_INVALIDINPUT_CALIB_PALNABETA";
    InvalidinputCalibPalnaalphabeta = -15412, "SAF_ERROR_INVALIDINPUT_CALIB_PALNAALPHABETA";
    InvalidinputCalibExtradrive = -15413, "SAF_ERROR_INVALIDINPUT_CALIB_EXTRADRIVE";
    InvalidinputCalibLimitmaxpower = -15414, "SAF_ERROR_INVALIDINPUT_CALIB_LIMITMAXPOWER";
    InvalidinputCalibTempsensor = -15415, "SAF_ERROR_INVALIDINPUT_CALIB_TEMPSENSOR";
    InvalidinputCalibTempi2caddrsensor1 = -15416, "SAF_ERROR_INVALIDINPUT_CALIB_TEMPI2CADDRSENSOR1";
    InvalidinputCalibTempi2caddrsensor2 = -15417, "SAF_ERROR_INVALIDINPUT_CALIB_TEMPI2CADDRSENSOR2";
    InvalidinputCalibPaenablegpio = -15418, "SAF_ERROR_INVALIDINPUT_CALIB_PAENABLEGPIO";
    InvalidinputCalibLnaenablegpio = -15419, "SAF_ERROR_INVALIDINPUT_CALIB_LNAENABLEGPIO";
    InvalidinputCalibRemotepagpio = -15420, "SAF_ERROR_INVALIDINPUT_CALIB_REMOTEPAGPIO";
    InvalidinputCalibC1gpio = -15421, "SAF_ERROR_INVALIDINPUT_CALIB_C1GPIO";
    InvalidinputCalibTxclaimgpio = -15422, "SAF_ERROR_INVALIDINPUT_CALIB_TXCLAIMGPIO";
    InvalidinputCalibCompengpio = -15423, "SAF_ERROR_INVALIDINPUT_CALIB_COMPENGPIO";
    InvalidinputCalibTimingpaen = -15424, "SAF_ERROR_INVALIDINPUT_CALIB_TIMINGPAEN";
    InvalidinputCalibTimingbbstart = -15425, "SAF_ERROR_INVALIDINPUT_CALIB_TIMINGBBSTART";
    InvalidinputCalibTimingauxadc = -15426, "SAF_ERROR_INVALIDINPUT_CALIB_TIMINGAUXADC";
    InvalidinputCalibTimingremotepa = -15427, "SAF_ERROR_INVALIDINPUT_CALIB_TIMINGREMOTEPA";
    InvalidinputCalibTimingpadis = -15428, "SAF_ERROR_INVALIDINPUT_CALIB_TIMINGPADIS";
    InvalidinputCalibTiminglnaen = -15429, "SAF_ERROR_INVALIDINPUT_CALIB_TIMINGLNAEN";
    InvalidinputCalib1ppsgpio = -15430, "SAF_ERROR_INVALIDINPUT_CALIB_1PPSGPIO";
    InvalidinputCalibCcagpio = -15431, "SAF_ERROR_INVALIDINPUT_CALIB_CCAGPIO";
    InvalidinputCalibTxactivegpio = -15432, "SAF_ERROR_INVALIDINPUT_CALIB_TXACTIVEGPIO";
    InvalidinputCalibRxactivegpio = -15433, "SAF_ERROR_INVALIDINPUT_CALIB_RXACTIVEGPIO";
    InvalidinputCalibOthertxgpio = -15434, "SAF_ERROR_INVALIDINPUT_CALIB_OTHERTXGPIO";
    InvalidinputCalibOtherrxgpio = -15435, "SAF_ERROR_INVALIDINPUT_CALIB_OTHERRXGPIO";
    InvalidinputCalibAtempant1auxadc = -15436, "SAF_ERROR_INVALIDINPUT_CALIB_ATEMPANT1AUXADC";
    InvalidinputCalibAtempant2auxadc = -15437, "SAF_ERROR_INVALIDINPUT_CALIB_ATEMPANT2AUXADC";
    InvalidinputTempPaant1 = -15500, "SAF_ERROR_INVALIDINPUT_TEMP_PAANT1";
    InvalidinputTempPaant2 = -15501, "SAF_ERROR_INVALIDINPUT_TEMP_PAANT2";
    InvalidinputGpioCmd = -15600, "SAF_ERROR_INVALIDINPUT_GPIO_CMD";
    InvalidinputGpioPin = -15601, "SAF_ERROR_INVALIDINPUT_GPIO_PIN";
    InvalidinputGpioValue = -15602, "SAF_ERROR_INVALIDINPUT_GPIO_VALUE";
    InvalidinputFaultCmd = -15700, "SAF_ERROR_INVALIDINPUT_FAULT_CMD";
    InvalidinputFaultCmderrorcode = -15701, "SAF_ERROR_INVALIDINPUT_FAULT_CMDERRORCODE";
    UsbDeviceNotPresent = -16100, "SAF_ERROR_USB_DEVICE_NOT_PRESENT";
    SpiDeviceNotPresent = -16200, "SAF_ERROR_SPI_DEVICE_NOT_PRESENT";
    SpiInterfaceTimeout = -16201, "SAF_ERROR_SPI_INTERFACE_TIMEOUT";
    SpiBufferAllocationFailure = -16202, "SAF_ERROR_SPI_BUFFER_ALLOCATION_FAILURE";
    SpiInputQueueExhausted = -16203, "SAF_ERROR_SPI_INPUT_QUEUE_EXHAUSTED";
    SpiOutputQueueError = -16204, "SAF_ERROR_SPI_OUTPUT_QUEUE_ERROR";
    SpiInvalidTransferStructure = -16205, "SAF_ERROR_SPI_INVALID_TRANSFER_STRUCTURE";
    SpiInvalidOutputContext = -16206, "SAF_ERROR_SPI_INVALID_OUTPUT_CONTEXT";
    SpiBufferOverrun = -16207, "SAF_ERROR_SPI_BUFFER_OVERRUN";
    SpiSystemError = -16208, "SAF_ERROR_SPI_SYSTEM_ERROR";
    SpiInvalidCriticalStructures = -16209, "SAF_ERROR_SPI_INVALID_CRITICAL_STRUCTURES";
    SpiInvalidDeviceId = -16210, "SAF_ERROR_SPI_INVALID_DEVICE_ID";
    SpiMemoryCorruption = -16211, "SAF_ERROR_SPI_MEMORY_CORRUPTION";
    SpiMemoryAllocationFailure = -16212, "SAF_ERROR_SPI_MEMORY_ALLOCATION_FAILURE";
    SpiInitErrorDeviceNotPresent = -16213, "SAF_ERROR_SPI_INIT_ERROR_DEVICE_NOT_PRESENT";
    SpiInitErrorDeviceAlreadySetup = -16214, "SAF_ERROR_SPI_INIT_ERROR_DEVICE_ALREADY_SETUP";
    SpiSystemCacheAllocFailure = -16215, "SAF_ERROR_SPI_SYSTEM_CACHE_ALLOC_FAILURE";
    SpiSystemListInitError = -16216, "SAF_ERROR_SPI_SYSTEM_LIST_INIT_ERROR";
    SpiSystemListItemAllocError = -16217, "SAF_ERROR_SPI_SYSTEM_LIST_ITEM_ALLOC_ERROR";
    SpiSystemListItemAddError = -16218, "SAF_ERROR_SPI_SYSTEM_LIST_ITEM_ADD_ERROR";
    SpiSystemBusToMasterError = -16219, "SAF_ERROR_SPI_SYSTEM_BUS_TO_MASTER_ERROR";
    SpiSystemInvalidChipselect = -16220, "SAF_ERROR_SPI_SYSTEM_INVALID_CHIPSELECT";
    SpiSystemAddDeviceError = -16221, "SAF_ERROR_SPI_SYSTEM_ADD_DEVICE_ERROR";
    SpiSystemDavPinRequestError = -16222, "SAF_ERROR_SPI_SYSTEM_DAV_PIN_REQUEST_ERROR";
    SpiSystemDavToIrqRequestError = -16223, "SAF_ERROR_SPI_SYSTEM_DAV_TO_IRQ_REQUEST_ERROR";
    SpiInvalidSpiMode = -16224, "SAF_ERROR_SPI_INVALID_SPI_MODE";
    SpiInterruptButNotEnabled = -16225, "SAF_ERROR_SPI_INTERRUPT_BUT_NOT_ENABLED";
    SdioDeviceNotRequired = -16300, "SAF_ERROR_SDIO_DEVICE_NOT_REQUIRED";
    SdioInterfaceTimeout = -16301, "SAF_ERROR_SDIO_INTERFACE_TIMEOUT";
    SdioEnableInterruptFailure = -16303, "SAF_ERROR_SDIO_ENABLE_INTERRUPT_FAILURE";
    SdioDisableInterruptFailure = -16304, "SAF_ERROR_SDIO_DISABLE_INTERRUPT_FAILURE";
    SdioClearInterruptFailure = -16305, "SAF_ERROR_SDIO_CLEAR_INTERRUPT_FAILURE";
    SdioSystemWriteToDeviceFailure = -16306, "SAF_ERROR_SDIO_SYSTEM_WRITE_TO_DEVICE_FAILURE";
    SdioSystemReadFromDeviceFailure = -16308, "SAF_ERROR_SDIO_SYSTEM_READ_FROM_DEVICE_FAILURE";
    SdioSystemRegisterDriverFailure = -16309, "SAF_ERROR_SDIO_SYSTEM_REGISTER_DRIVER_FAILURE";
    SdioSystemListInitError = -16310, "SAF_ERROR_SDIO_SYSTEM_LIST_INIT_ERROR";
    SdioSystemListItemAllocError = -16311, "SAF_ERROR_SDIO_SYSTEM_LIST_ITEM_ALLOC_ERROR";
    SdioSystemListItemAddError = -16312, "SAF_ERROR_SDIO_SYSTEM_LIST_ITEM_ADD_ERROR";
    SdioSystemFunctionEnableError = -16313, "SAF_ERROR_SDIO_SYSTEM_FUNCTION_ENABLE_ERROR";
    SdioSystemSetBlockSizeError = -16314, "SAF_ERROR_SDIO_SYSTEM_SET_BLOCK_SIZE_ERROR";
    SdioSystemReadByteError = -16315, "SAF_ERROR_SDIO_SYSTEM_READ_BYTE_ERROR";
    SdioSystemWriteByteError = -16316, "SAF_ERROR_SDIO_SYSTEM_WRITE_BYTE_ERROR";
    SdioMemoryCorruption = -16317, "SAF_ERROR_SDIO_MEMORY_CORRUPTION";
    SdioOutNotEnabled = -16318, "SAF_ERROR_SDIO_OUT_NOT_ENABLED";
    SdioInNotEnabled = -16319, "SAF_ERROR_SDIO_IN_NOT_ENABLED";
    SdioSystemFunctionNotEnabled = -16320, "SAF_ERROR_SDIO_SYSTEM_FUNCTION_NOT_ENABLED";
    SdioInputQueueExhausted = -16321, "SAF_ERROR_SDIO_INPUT_QUEUE_EXHAUSTED";
    SdioZeroUploadLength = -16322, "SAF_ERROR_SDIO_ZERO_UPLOAD_LENGTH";
    SdioCorruptedInputPacket = -16323, "SAF_ERROR_SDIO_CORRUPTED_INPUT_PACKET";
    SdioMemoryAllocationFailure = -16324, "SAF_ERROR_SDIO_MEMORY_ALLOCATION_FAILURE";
    EthDeviceNotPresent = -16400, "SAF_ERROR_ETH_DEVICE_NOT_PRESENT";
    EthMemoryCorruption = -16401, "SAF_ERROR_ETH_MEMORY_CORRUPTION";
    EthCorruptedInputPacket = -16402, "SAF_ERROR_ETH_CORRUPTED_INPUT_PACKET";
    EthSocketMissing = -16403, "SAF_ERROR_ETH_SOCKET_MISSING";
    EthInputQueueExhausted = -16404, "SAF_ERROR_ETH_INPUT_QUEUE_EXHAUSTED";
    EthMemoryAllocationFailure = -16405, "SAF_ERROR_ETH_MEMORY_ALLOCATION_FAILURE";
    EthSystemTxError = -16406, "SAF_ERROR_ETH_SYSTEM_TX_ERROR";
    EthSystemRxError = -16407, "SAF_ERROR_ETH_SYSTEM_RX_ERROR";
    EthSystemRxSocketError = -16408, "SAF_ERROR_ETH_SYSTEM_RX_SOCKET_ERROR";
    EthSystemBindError = -16409, "SAF_ERROR_ETH_SYSTEM_BIND_ERROR";
    EthSystemSetSchedulerError = -16410, "SAF_ERROR_ETH_SYSTEM_SET_SCHEDULER_ERROR";
    EthSystemListInitError = -16411, "SAF_ERROR_ETH_SYSTEM_LIST_INIT_ERROR";
    EthSystemListItemAllocError = -16412, "SAF_ERROR_ETH_SYSTEM_LIST_ITEM_ALLOC_ERROR";
    EthSystemListItemAddError = -16413, "SAF_ERROR_ETH_SYSTEM_LIST_ITEM_ADD_ERROR";
    EthSystemOverflowError = -16414, "SAF_ERROR_ETH_SYSTEM_OVERFLOW_ERROR";
    EthInterfaceTimeout = -16415, "SAF_ERROR_ETH_INTERFACE_TIMEOUT";
    EthOutNotEnabled = -16416, "SAF_ERROR_ETH_OUT_NOT_ENABLED";
}

/// Firmware block a fault code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SafSubsystem {
    None,
    General,
    TxQueue,
    HostUpload,
    Command,
    Eeprom,
    Memory,
    Capture,
    Register,
    Gpio,
    Log,
    C2xSec,
    TimeSync,
    MessageLength,
    Sdio,
    Dsp,
    Ethernet,
    SelfTest,
    Spi,
    Mac,
    Temperature,
    Tx,
    Rx,
    Loopback,
    Rfe,
    Compensator,
    FailSafe,
    PowerOnSelfTest,
    Mbist,
    Boot,
    InvalidInput,
    Usb,
}

impl SafErrorCode {
    /// Raw `Ret` value.
    pub fn as_raw(self) -> i16 {
        self as i16
    }

    /// Group the code by the hundred-block it is allocated from.
    pub fn subsystem(self) -> SafSubsystem {
        match self.as_raw() {
            0 => SafSubsystem::None,
            -10099..=-10000 => SafSubsystem::General,
            -10199..=-10100 => SafSubsystem::TxQueue,
            -10299..=-10200 => SafSubsystem::HostUpload,
            -10399..=-10300 => SafSubsystem::Command,
            -10499..=-10400 => SafSubsystem::Eeprom,
            -10599..=-10500 => SafSubsystem::Memory,
            -10699..=-10600 => SafSubsystem::Capture,
            -10799..=-10700 => SafSubsystem::Register,
            -10899..=-10800 => SafSubsystem::Gpio,
            -10999..=-10900 => SafSubsystem::Log,
            -11099..=-11000 => SafSubsystem::C2xSec,
            -11199..=-11100 | -12899..=-12800 => SafSubsystem::TimeSync,
            -11299..=-11200 => SafSubsystem::MessageLength,
            -11399..=-11300 | -16399..=-16300 => SafSubsystem::Sdio,
            -11499..=-11400 | -11999..=-11900 => SafSubsystem::Dsp,
            -11599..=-11500 | -16499..=-16400 => SafSubsystem::Ethernet,
            -11699..=-11600 | -14099..=-14000 => SafSubsystem::SelfTest,
            -11799..=-11700 | -16299..=-16200 => SafSubsystem::Spi,
            -11899..=-11800 | -12099..=-12000 | -12999..=-12900 => SafSubsystem::Mac,
            -12199..=-12100 => SafSubsystem::Temperature,
            -12299..=-12200 => SafSubsystem::Tx,
            -12399..=-12300 => SafSubsystem::Rx,
            -12499..=-12400 => SafSubsystem::Loopback,
            -12599..=-12500 => SafSubsystem::Rfe,
            -12699..=-12600 => SafSubsystem::HostUpload,
            -12799..=-12700 => SafSubsystem::Compensator,
            -13999..=-13000 => SafSubsystem::FailSafe,
            -14399..=-14100 => SafSubsystem::PowerOnSelfTest,
            -14499..=-14400 => SafSubsystem::Mbist,
            -14999..=-14500 => SafSubsystem::Boot,
            -15999..=-15000 => SafSubsystem::InvalidInput,
            -16199..=-16100 => SafSubsystem::Usb,
            _ => SafSubsystem::General,
        }
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for SafErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for raw in [0i16, -10000, -10404, -11036, -13094, -14519, -15701, -16225, -16416] {
            let code = SafErrorCode::from_raw(raw).unwrap();
            assert_eq!(code.as_raw(), raw);
        }
    }

    #[test]
    fn names_and_groups() {
        let code = SafErrorCode::from_raw(-10404).unwrap();
        assert_eq!(code, SafErrorCode::EepromReadFailed);
        assert_eq!(code.name(), "SAF_ERROR_EEPROM_READ_FAILED");
        assert_eq!(code.subsystem(), SafSubsystem::Eeprom);
        assert_eq!(code.to_string(), "SAF_ERROR_EEPROM_READ_FAILED (-10404)");
        assert_eq!(SafErrorCode::EthOutNotEnabled.subsystem(), SafSubsystem::Ethernet);
        assert_eq!(SafErrorCode::UsbDeviceNotPresent.subsystem(), SafSubsystem::Usb);
        assert_eq!(SafErrorCode::InvalidinputTxpktRadioid.subsystem(), SafSubsystem::InvalidInput);
        assert!(SafErrorCode::Success.is_success());
    }

    #[test]
    fn gaps_are_undefined() {
        // Neither the errno range nor MKxStatus values belong to this namespace.
        for raw in [-1i16, -256, -769, -10011, -10099, -16000, i16::MIN, 1] {
            assert_eq!(SafErrorCode::from_raw(raw), None, "{raw}");
        }
    }
}
